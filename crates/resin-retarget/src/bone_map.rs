//! Source joint name to humanoid bone role mapping.

use rhizome_resin_rig::{HumanBone, Skeleton};
use std::collections::BTreeMap;

/// Mixamo joint names and the roles they play.
pub const MIXAMO_BONES: &[(&str, HumanBone)] = &[
    ("mixamorigHips", HumanBone::Hips),
    ("mixamorigSpine", HumanBone::Spine),
    ("mixamorigSpine1", HumanBone::Chest),
    ("mixamorigSpine2", HumanBone::UpperChest),
    ("mixamorigNeck", HumanBone::Neck),
    ("mixamorigHead", HumanBone::Head),
    ("mixamorigLeftShoulder", HumanBone::LeftShoulder),
    ("mixamorigLeftArm", HumanBone::LeftUpperArm),
    ("mixamorigLeftForeArm", HumanBone::LeftLowerArm),
    ("mixamorigLeftHand", HumanBone::LeftHand),
    ("mixamorigLeftHandThumb1", HumanBone::LeftThumbMetacarpal),
    ("mixamorigLeftHandThumb2", HumanBone::LeftThumbProximal),
    ("mixamorigLeftHandThumb3", HumanBone::LeftThumbDistal),
    ("mixamorigLeftHandIndex1", HumanBone::LeftIndexProximal),
    ("mixamorigLeftHandIndex2", HumanBone::LeftIndexIntermediate),
    ("mixamorigLeftHandIndex3", HumanBone::LeftIndexDistal),
    ("mixamorigLeftHandMiddle1", HumanBone::LeftMiddleProximal),
    ("mixamorigLeftHandMiddle2", HumanBone::LeftMiddleIntermediate),
    ("mixamorigLeftHandMiddle3", HumanBone::LeftMiddleDistal),
    ("mixamorigLeftHandRing1", HumanBone::LeftRingProximal),
    ("mixamorigLeftHandRing2", HumanBone::LeftRingIntermediate),
    ("mixamorigLeftHandRing3", HumanBone::LeftRingDistal),
    ("mixamorigLeftHandPinky1", HumanBone::LeftLittleProximal),
    ("mixamorigLeftHandPinky2", HumanBone::LeftLittleIntermediate),
    ("mixamorigLeftHandPinky3", HumanBone::LeftLittleDistal),
    ("mixamorigRightShoulder", HumanBone::RightShoulder),
    ("mixamorigRightArm", HumanBone::RightUpperArm),
    ("mixamorigRightForeArm", HumanBone::RightLowerArm),
    ("mixamorigRightHand", HumanBone::RightHand),
    ("mixamorigRightHandPinky1", HumanBone::RightLittleProximal),
    ("mixamorigRightHandPinky2", HumanBone::RightLittleIntermediate),
    ("mixamorigRightHandPinky3", HumanBone::RightLittleDistal),
    ("mixamorigRightHandRing1", HumanBone::RightRingProximal),
    ("mixamorigRightHandRing2", HumanBone::RightRingIntermediate),
    ("mixamorigRightHandRing3", HumanBone::RightRingDistal),
    ("mixamorigRightHandMiddle1", HumanBone::RightMiddleProximal),
    ("mixamorigRightHandMiddle2", HumanBone::RightMiddleIntermediate),
    ("mixamorigRightHandMiddle3", HumanBone::RightMiddleDistal),
    ("mixamorigRightHandIndex1", HumanBone::RightIndexProximal),
    ("mixamorigRightHandIndex2", HumanBone::RightIndexIntermediate),
    ("mixamorigRightHandIndex3", HumanBone::RightIndexDistal),
    ("mixamorigRightHandThumb1", HumanBone::RightThumbMetacarpal),
    ("mixamorigRightHandThumb2", HumanBone::RightThumbProximal),
    ("mixamorigRightHandThumb3", HumanBone::RightThumbDistal),
    ("mixamorigLeftUpLeg", HumanBone::LeftUpperLeg),
    ("mixamorigLeftLeg", HumanBone::LeftLowerLeg),
    ("mixamorigLeftFoot", HumanBone::LeftFoot),
    ("mixamorigLeftToeBase", HumanBone::LeftToes),
    ("mixamorigRightUpLeg", HumanBone::RightUpperLeg),
    ("mixamorigRightLeg", HumanBone::RightLowerLeg),
    ("mixamorigRightFoot", HumanBone::RightFoot),
    ("mixamorigRightToeBase", HumanBone::RightToes),
];

/// Merged mapping from source joint names to bone roles.
///
/// Built once per call from [`MIXAMO_BONES`] with caller overrides laid over
/// it key by key. Names absent from both are unmapped, which is not an error:
/// rigs commonly carry twist or helper joints with no humanoid role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoneMap {
    entries: BTreeMap<String, HumanBone>,
}

impl Default for BoneMap {
    fn default() -> Self {
        Self {
            entries: MIXAMO_BONES
                .iter()
                .map(|&(name, bone)| (name.to_string(), bone))
                .collect(),
        }
    }
}

impl BoneMap {
    /// Creates the default Mixamo mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the default mapping with `overrides` taking precedence.
    pub fn with_overrides(overrides: &BTreeMap<String, HumanBone>) -> Self {
        let mut map = Self::default();
        map.entries
            .extend(overrides.iter().map(|(name, &bone)| (name.clone(), bone)));
        map
    }

    /// Creates a mapping containing only the given entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, HumanBone)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, bone)| (name.into(), bone))
                .collect(),
        }
    }

    /// Looks up the role of a source joint.
    pub fn resolve(&self, source_joint: &str) -> Option<HumanBone> {
        self.entries.get(source_joint).copied()
    }

    /// Finds the first source joint (by name order) mapped to `bone` that
    /// exists in `skeleton`.
    pub fn source_for<'a>(&'a self, bone: HumanBone, skeleton: &Skeleton) -> Option<&'a str> {
        self.entries
            .iter()
            .filter(|&(_, &b)| b == bone)
            .map(|(name, _)| name.as_str())
            .find(|name| skeleton.find_joint(name).is_some())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
