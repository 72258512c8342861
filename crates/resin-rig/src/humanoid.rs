//! Canonical humanoid bone roles and target rigs built on them.

use crate::error::RigError;
use crate::skeleton::{Joint, JointId, Skeleton};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

macro_rules! human_bones {
    ($($variant:ident => $name:literal,)*) => {
        /// A rig-independent humanoid bone role.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum HumanBone {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $name))]
                #[allow(missing_docs)]
                $variant,
            )*
        }

        impl HumanBone {
            /// Every bone role, torso first.
            pub const ALL: &'static [HumanBone] = &[$(HumanBone::$variant,)*];

            /// Canonical camelCase name (e.g. `leftUpperArm`).
            pub fn as_str(self) -> &'static str {
                match self {
                    $(HumanBone::$variant => $name,)*
                }
            }
        }

        impl FromStr for HumanBone {
            type Err = UnknownHumanBone;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(HumanBone::$variant),)*
                    _ => Err(UnknownHumanBone(s.to_string())),
                }
            }
        }
    };
}

human_bones! {
    Hips => "hips",
    Spine => "spine",
    Chest => "chest",
    UpperChest => "upperChest",
    Neck => "neck",
    Head => "head",
    LeftEye => "leftEye",
    RightEye => "rightEye",
    Jaw => "jaw",
    LeftUpperLeg => "leftUpperLeg",
    LeftLowerLeg => "leftLowerLeg",
    LeftFoot => "leftFoot",
    LeftToes => "leftToes",
    RightUpperLeg => "rightUpperLeg",
    RightLowerLeg => "rightLowerLeg",
    RightFoot => "rightFoot",
    RightToes => "rightToes",
    LeftShoulder => "leftShoulder",
    LeftUpperArm => "leftUpperArm",
    LeftLowerArm => "leftLowerArm",
    LeftHand => "leftHand",
    RightShoulder => "rightShoulder",
    RightUpperArm => "rightUpperArm",
    RightLowerArm => "rightLowerArm",
    RightHand => "rightHand",
    LeftThumbMetacarpal => "leftThumbMetacarpal",
    LeftThumbProximal => "leftThumbProximal",
    LeftThumbDistal => "leftThumbDistal",
    LeftIndexProximal => "leftIndexProximal",
    LeftIndexIntermediate => "leftIndexIntermediate",
    LeftIndexDistal => "leftIndexDistal",
    LeftMiddleProximal => "leftMiddleProximal",
    LeftMiddleIntermediate => "leftMiddleIntermediate",
    LeftMiddleDistal => "leftMiddleDistal",
    LeftRingProximal => "leftRingProximal",
    LeftRingIntermediate => "leftRingIntermediate",
    LeftRingDistal => "leftRingDistal",
    LeftLittleProximal => "leftLittleProximal",
    LeftLittleIntermediate => "leftLittleIntermediate",
    LeftLittleDistal => "leftLittleDistal",
    RightThumbMetacarpal => "rightThumbMetacarpal",
    RightThumbProximal => "rightThumbProximal",
    RightThumbDistal => "rightThumbDistal",
    RightIndexProximal => "rightIndexProximal",
    RightIndexIntermediate => "rightIndexIntermediate",
    RightIndexDistal => "rightIndexDistal",
    RightMiddleProximal => "rightMiddleProximal",
    RightMiddleIntermediate => "rightMiddleIntermediate",
    RightMiddleDistal => "rightMiddleDistal",
    RightRingProximal => "rightRingProximal",
    RightRingIntermediate => "rightRingIntermediate",
    RightRingDistal => "rightRingDistal",
    RightLittleProximal => "rightLittleProximal",
    RightLittleIntermediate => "rightLittleIntermediate",
    RightLittleDistal => "rightLittleDistal",
}

impl fmt::Display for HumanBone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error from parsing an unknown bone role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown humanoid bone: {0}")]
pub struct UnknownHumanBone(pub String);

/// Axis convention of a target rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CoordinateConvention {
    /// Older avatar convention, facing the opposite way around the vertical axis.
    Legacy,
    /// Current avatar convention.
    #[default]
    Modern,
}

/// A target skeleton annotated with humanoid bone roles.
#[derive(Debug, Clone)]
pub struct HumanoidRig {
    skeleton: Skeleton,
    bones: BTreeMap<HumanBone, JointId>,
    convention: CoordinateConvention,
}

impl HumanoidRig {
    /// Wraps a validated skeleton with no bone roles assigned yet.
    pub fn new(skeleton: Skeleton, convention: CoordinateConvention) -> Result<Self, RigError> {
        skeleton.validate()?;
        Ok(Self {
            skeleton,
            bones: BTreeMap::new(),
            convention,
        })
    }

    /// Assigns a bone role to the named joint.
    pub fn with_bone(mut self, bone: HumanBone, joint: &str) -> Result<Self, RigError> {
        let id = self
            .skeleton
            .find_joint(joint)
            .ok_or_else(|| RigError::UnknownJoint(joint.to_string()))?;
        self.bones.insert(bone, id);
        Ok(self)
    }

    /// Assigns every role whose canonical name matches a joint name.
    ///
    /// Useful for rigs whose joints are already named after the roles.
    pub fn with_canonical_names(mut self) -> Self {
        for &bone in HumanBone::ALL {
            if let Some(id) = self.skeleton.find_joint(bone.as_str()) {
                self.bones.insert(bone, id);
            }
        }
        self
    }

    /// The underlying skeleton.
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// The rig's axis convention.
    pub fn convention(&self) -> CoordinateConvention {
        self.convention
    }

    /// Joint ID assigned to a role.
    pub fn joint_id(&self, bone: HumanBone) -> Option<JointId> {
        self.bones.get(&bone).copied()
    }

    /// Joint assigned to a role.
    pub fn joint(&self, bone: HumanBone) -> Option<&Joint> {
        self.joint_id(bone).and_then(|id| self.skeleton.joint(id))
    }

    /// The designated root/hip joint.
    pub fn hips(&self) -> Option<JointId> {
        self.joint_id(HumanBone::Hips)
    }

    /// Iterates assigned roles in role order.
    pub fn bones(&self) -> impl Iterator<Item = (HumanBone, JointId)> + '_ {
        self.bones.iter().map(|(&bone, &id)| (bone, id))
    }
}
