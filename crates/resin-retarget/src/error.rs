//! Failures and warnings produced while retargeting.

use rhizome_resin_rig::{ChannelError, HumanBone, SkeletonError, TrackError};
use std::fmt;
use thiserror::Error;

/// Invalid [`RetargetConfig`](crate::RetargetConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `animation_clip_name` is empty.
    #[error("animation clip name is empty")]
    EmptyClipName,

    /// A custom bone map entry has an empty source joint name.
    #[error("custom bone map entry for {0} has an empty joint name")]
    EmptyOverrideKey(HumanBone),

    /// The configuration document could not be parsed.
    #[cfg(feature = "serde")]
    #[error("invalid config document: {0}")]
    Parse(String),
}

/// Which rig a scale measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigSide {
    /// The rig the clip was authored for.
    Source,
    /// The rig the clip is retargeted onto.
    Target,
}

impl fmt::Display for RigSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RigSide::Source => f.write_str("source"),
            RigSide::Target => f.write_str("target"),
        }
    }
}

/// Why the hip-height scale factor could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    /// No source joint maps to the hips role.
    #[error("source rig has no hips joint")]
    MissingSourceHips,

    /// The target rig has no joint assigned to the hips role.
    #[error("target rig has no hips joint")]
    MissingTargetHips,

    /// A hip height is zero or not finite.
    #[error("{rig} hip height is degenerate: {height}")]
    DegenerateHeight {
        /// Which rig.
        rig: RigSide,
        /// The measured height.
        height: f32,
    },

    /// The ratio of the two heights is not finite.
    #[error("hip height ratio is not finite")]
    NonFiniteScale,
}

/// A failure that aborts the whole retarget call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RetargetError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The source asset holds no clip with the requested name.
    #[error("animation clip not found: {name}")]
    ClipNotFound {
        /// The requested clip name.
        name: String,
    },

    /// The source skeleton breaks a structural invariant.
    #[error("invalid source skeleton: {0}")]
    InvalidSourceSkeleton(#[from] SkeletonError),

    /// The hip-height scale could not be computed.
    #[error("position scale undefined: {0}")]
    ScaleUndefined(#[from] ScaleError),

    /// A source track name is not `<joint>.<property>`.
    #[error("malformed channel name: {0}")]
    InvalidChannel(#[from] ChannelError),

    /// A source track holds malformed keyframe data.
    #[error("malformed track {channel}: {source}")]
    InternalFault {
        /// Channel name of the offending track.
        channel: String,
        /// What was wrong with it.
        source: TrackError,
    },

    /// Retargeting produced a NaN or infinite sample.
    #[error("retargeted track {channel} has non-finite samples")]
    NonFiniteOutput {
        /// Channel name of the offending source track.
        channel: String,
    },
}

/// Why a single track was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningReason {
    /// The bone map has no entry for the source joint.
    UnmappedBone,
    /// The target rig has no joint for the mapped role.
    TargetJointMissing(HumanBone),
    /// The source skeleton has no joint with the track's name.
    SourceJointMissing,
    /// The channel animates a property other than rotation or position.
    UnsupportedProperty(String),
    /// Position tracks were skipped because the scale was undefined.
    PositionSkipped,
}

impl fmt::Display for WarningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningReason::UnmappedBone => f.write_str("no bone map entry"),
            WarningReason::TargetJointMissing(bone) => {
                write!(f, "target rig has no joint for {bone}")
            }
            WarningReason::SourceJointMissing => f.write_str("joint missing from source skeleton"),
            WarningReason::UnsupportedProperty(property) => {
                write!(f, "unsupported property {property}")
            }
            WarningReason::PositionSkipped => f.write_str("position scale undefined"),
        }
    }
}

/// A non-fatal problem: one track was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetargetWarning {
    /// Source joint (or raw channel name when it could not be parsed).
    pub joint: String,
    /// Why the track was dropped.
    pub reason: WarningReason,
}

impl RetargetWarning {
    /// Creates a warning.
    pub fn new(joint: impl Into<String>, reason: WarningReason) -> Self {
        Self {
            joint: joint.into(),
            reason,
        }
    }
}

impl fmt::Display for RetargetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.joint, self.reason)
    }
}
