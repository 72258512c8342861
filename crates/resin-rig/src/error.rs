//! Error types for resin-rig.

use thiserror::Error;

/// Structural problems in a [`Skeleton`](crate::Skeleton).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkeletonError {
    /// The skeleton has no joints.
    #[error("skeleton has no joints")]
    Empty,

    /// More than one joint has no parent.
    #[error("skeleton has {count} root joints, expected exactly one")]
    MultipleRoots {
        /// Number of parentless joints.
        count: usize,
    },

    /// Two joints share a name.
    #[error("duplicate joint name: {0}")]
    DuplicateName(String),

    /// A joint refers to a parent that does not precede it.
    #[error("joint {joint} has invalid parent index {parent}")]
    InvalidParent {
        /// Name of the offending joint.
        joint: String,
        /// The parent index it refers to.
        parent: u32,
    },
}

/// Malformed keyframe data in a [`KeyframeTrack`](crate::KeyframeTrack).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    /// The track has no keyframes.
    #[error("track has no keyframes")]
    Empty,

    /// The value buffer does not hold `times × width` floats.
    #[error("expected {expected} values for {keyframes} keyframes, got {got}")]
    ValueCount {
        /// Number of keyframe times.
        keyframes: usize,
        /// Required value count.
        expected: usize,
        /// Actual value count.
        got: usize,
    },

    /// Keyframe times are not strictly ascending.
    #[error("keyframe time {time} at index {index} does not follow the previous one")]
    NonAscendingTimes {
        /// Index of the offending keyframe.
        index: usize,
        /// Its time.
        time: f32,
    },

    /// A time or value is NaN or infinite.
    #[error("non-finite sample at keyframe {index}")]
    NonFinite {
        /// Index of the offending keyframe.
        index: usize,
    },

    /// A rotation sample is not a unit quaternion.
    #[error("rotation at keyframe {index} has norm {norm}")]
    NonUnitQuaternion {
        /// Index of the offending keyframe.
        index: usize,
        /// Its norm.
        norm: f32,
    },
}

/// Failure to parse a `<joint>.<property>` channel name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// No `.` separates joint and property.
    #[error("channel name has no property suffix: {0}")]
    MissingProperty(String),

    /// The joint part is empty.
    #[error("channel name has no joint: {0}")]
    MissingJoint(String),

    /// The property suffix is not a supported kind.
    #[error("unsupported channel property: {0}")]
    UnsupportedProperty(String),
}

/// Errors building a [`HumanoidRig`](crate::HumanoidRig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RigError {
    /// The named joint is not part of the rig's skeleton.
    #[error("joint not found in skeleton: {0}")]
    UnknownJoint(String),

    /// The underlying skeleton is malformed.
    #[error(transparent)]
    Skeleton(#[from] SkeletonError),
}
