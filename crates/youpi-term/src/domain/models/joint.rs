use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Motors of the Youpi arm, from the base up to the gripper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Joint {
    Base,
    Shoulder,
    Elbow,
    Wrist,
    HandRotation,
    Gripper,
}

impl Joint {
    /// Every joint taking part in a homing sequence. The gripper keeps its
    /// current state so that a held object is not dropped.
    pub fn all_but_gripper() -> Vec<Joint> {
        return Joint::iter().filter(|j| *j != Joint::Gripper).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homing_set_excludes_gripper() {
        let joints = Joint::all_but_gripper();
        assert_eq!(joints.len(), 5);
        assert!(!joints.contains(&Joint::Gripper));
        assert_eq!(joints[0], Joint::Base);
    }

    #[test]
    fn names_are_kebab_case() {
        assert_eq!(Joint::HandRotation.to_string(), "hand-rotation");
        assert_eq!("shoulder".parse::<Joint>().unwrap(), Joint::Shoulder);
    }
}
