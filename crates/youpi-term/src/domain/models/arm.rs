use async_trait::async_trait;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, EnumVariantNames};

use super::ArmError;
use super::Joint;

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumVariantNames, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ArmName {
    #[default]
    Simulated,
}

impl ArmName {
    pub fn parse(s: &str) -> Option<ArmName> {
        return ArmName::iter().find(|e| e.to_string() == s);
    }
}

/// Motion interface of the arm. Angles are in degrees, relative to the
/// current position.
#[async_trait]
pub trait ArmService: Send {
    fn name(&self) -> ArmName;

    async fn move_joint(&mut self, joint: Joint, angle: f32, blocking: bool)
        -> Result<(), ArmError>;

    async fn open_gripper(&mut self, blocking: bool) -> Result<(), ArmError>;

    async fn close_gripper(&mut self, blocking: bool) -> Result<(), ArmError>;

    async fn go_home(&mut self, joints: &[Joint], blocking: bool) -> Result<(), ArmError>;
}

pub type ArmBox = Box<dyn ArmService>;
