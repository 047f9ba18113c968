use strum_macros::EnumIter;

use super::ArmBox;
use super::ArmError;
use super::Joint;
use super::Key;

/// Magnitude of a single manual move, in degrees.
pub const MANUAL_STEP: f32 = 5.0;

/// Keys understood by the manual control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ManualKey {
    ShoulderUp,
    ShoulderDown,
    ElbowUp,
    ElbowDown,
    WristUp,
    WristDown,
    BaseLeft,
    BaseRight,
    HandCcw,
    HandCw,
    GripperOpen,
    GripperClose,
    Home,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MotionCommand {
    Move { joint: Joint, angle: f32 },
    OpenGripper,
    CloseGripper,
    Home,
}

impl ManualKey {
    pub fn from_key(key: Key) -> Option<ManualKey> {
        let Key::Char(c) = key else {
            return None;
        };

        let manual_key = match c.to_ascii_uppercase() {
            '1' => ManualKey::ShoulderUp,
            '4' => ManualKey::ShoulderDown,
            '2' => ManualKey::ElbowUp,
            '5' => ManualKey::ElbowDown,
            '3' => ManualKey::WristUp,
            '6' => ManualKey::WristDown,
            '7' => ManualKey::BaseLeft,
            '9' => ManualKey::BaseRight,
            '*' => ManualKey::HandCcw,
            '#' => ManualKey::HandCw,
            'O' => ManualKey::GripperOpen,
            'F' => ManualKey::GripperClose,
            'R' => ManualKey::Home,
            _ => return None,
        };

        return Some(manual_key);
    }

    pub fn command(self) -> MotionCommand {
        // Elbow motor turns the other way round.
        let (joint, angle) = match self {
            ManualKey::ShoulderUp => (Joint::Shoulder, MANUAL_STEP),
            ManualKey::ShoulderDown => (Joint::Shoulder, -MANUAL_STEP),
            ManualKey::ElbowUp => (Joint::Elbow, -MANUAL_STEP),
            ManualKey::ElbowDown => (Joint::Elbow, MANUAL_STEP),
            ManualKey::WristUp => (Joint::Wrist, MANUAL_STEP),
            ManualKey::WristDown => (Joint::Wrist, -MANUAL_STEP),
            ManualKey::BaseLeft => (Joint::Base, MANUAL_STEP),
            ManualKey::BaseRight => (Joint::Base, -MANUAL_STEP),
            ManualKey::HandCcw => (Joint::HandRotation, -MANUAL_STEP),
            ManualKey::HandCw => (Joint::HandRotation, MANUAL_STEP),
            ManualKey::GripperOpen => return MotionCommand::OpenGripper,
            ManualKey::GripperClose => return MotionCommand::CloseGripper,
            ManualKey::Home => return MotionCommand::Home,
        };

        return MotionCommand::Move { joint, angle };
    }
}

impl MotionCommand {
    /// Runs the command to completion.
    pub async fn execute(&self, arm: &mut ArmBox) -> Result<(), ArmError> {
        match self {
            MotionCommand::Move { joint, angle } => {
                tracing::info!(joint = %joint, angle, "moving joint");
                return arm.move_joint(*joint, *angle, true).await;
            }
            MotionCommand::OpenGripper => return arm.open_gripper(true).await,
            MotionCommand::CloseGripper => return arm.close_gripper(true).await,
            MotionCommand::Home => return arm.go_home(&Joint::all_but_gripper(), true).await,
        }
    }
}
