use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use strum::IntoEnumIterator;

use crate::domain::models::ArmError;
use crate::domain::models::ArmName;
use crate::domain::models::ArmService;
use crate::domain::models::Joint;

const GRIPPER_OPEN: f32 = 90.0;
const GRIPPER_CLOSED: f32 = 0.0;

fn default_range(joint: Joint) -> (f32, f32) {
    match joint {
        Joint::Base => return (-150.0, 150.0),
        Joint::Shoulder => return (-90.0, 90.0),
        Joint::Elbow => return (-120.0, 120.0),
        Joint::Wrist => return (-110.0, 110.0),
        Joint::HandRotation => return (-180.0, 180.0),
        Joint::Gripper => return (GRIPPER_CLOSED, GRIPPER_OPEN),
    }
}

/// Arm model keeping joint positions in memory.
///
/// Every joint starts at its home position (0 degrees, gripper closed).
/// Moves leaving a joint's range are refused with a mechanical limit fault
/// and leave the joint where it was. Blocking motions last `motion_delay`.
pub struct SimulatedArm {
    positions: HashMap<Joint, f32>,
    ranges: HashMap<Joint, (f32, f32)>,
    motion_delay: Duration,
}

impl SimulatedArm {
    pub fn new(motion_delay: Duration) -> SimulatedArm {
        return SimulatedArm {
            positions: Joint::iter().map(|j| (j, 0.0)).collect(),
            ranges: Joint::iter().map(|j| (j, default_range(j))).collect(),
            motion_delay,
        };
    }

    pub fn with_range(mut self, joint: Joint, min: f32, max: f32) -> SimulatedArm {
        self.ranges.insert(joint, (min, max));
        return self;
    }

    pub fn position(&self, joint: Joint) -> f32 {
        return self.positions.get(&joint).copied().unwrap_or_default();
    }

    pub fn is_gripper_open(&self) -> bool {
        return self.position(Joint::Gripper) >= GRIPPER_OPEN;
    }

    fn range(&self, joint: Joint) -> (f32, f32) {
        return self
            .ranges
            .get(&joint)
            .copied()
            .unwrap_or_else(|| default_range(joint));
    }

    fn set(&mut self, joint: Joint, target: f32) -> Result<(), ArmError> {
        let (min, max) = self.range(joint);
        if target < min || target > max {
            return Err(ArmError::MechanicalLimit {
                joint,
                target,
                min,
                max,
            });
        }

        self.positions.insert(joint, target);
        return Ok(());
    }

    async fn settle(&self, blocking: bool) {
        if blocking && !self.motion_delay.is_zero() {
            tokio::time::sleep(self.motion_delay).await;
        }
    }
}

#[async_trait]
impl ArmService for SimulatedArm {
    fn name(&self) -> ArmName {
        return ArmName::Simulated;
    }

    async fn move_joint(
        &mut self,
        joint: Joint,
        angle: f32,
        blocking: bool,
    ) -> Result<(), ArmError> {
        let target = self.position(joint) + angle;
        self.set(joint, target)?;
        tracing::debug!(joint = %joint, position = target, "joint moved");
        self.settle(blocking).await;

        return Ok(());
    }

    async fn open_gripper(&mut self, blocking: bool) -> Result<(), ArmError> {
        // Opening further than fully open hits the end stop.
        let target = if self.is_gripper_open() {
            GRIPPER_OPEN + 1.0
        } else {
            GRIPPER_OPEN
        };
        self.set(Joint::Gripper, target)?;
        self.settle(blocking).await;

        return Ok(());
    }

    async fn close_gripper(&mut self, blocking: bool) -> Result<(), ArmError> {
        let target = if self.position(Joint::Gripper) <= GRIPPER_CLOSED {
            GRIPPER_CLOSED - 1.0
        } else {
            GRIPPER_CLOSED
        };
        self.set(Joint::Gripper, target)?;
        self.settle(blocking).await;

        return Ok(());
    }

    async fn go_home(&mut self, joints: &[Joint], blocking: bool) -> Result<(), ArmError> {
        for joint in joints {
            self.positions.insert(*joint, 0.0);
        }
        tracing::info!(joints = joints.len(), "arm homed");
        self.settle(blocking).await;

        return Ok(());
    }
}

#[cfg(test)]
#[path = "simulated_test.rs"]
mod tests;
