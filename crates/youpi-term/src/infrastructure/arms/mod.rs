mod simulated;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
pub use simulated::*;

use crate::domain::models::ArmBox;
use crate::domain::models::ArmName;

pub struct ArmManager {}

impl ArmManager {
    pub fn get(name: ArmName, motion_delay: Duration) -> Result<ArmBox> {
        if name == ArmName::Simulated {
            return Ok(Box::new(SimulatedArm::new(motion_delay)));
        }

        bail!(format!("No backend implemented for {name}"))
    }
}
