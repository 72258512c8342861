//! Skeletons and keyframe animation data for resin.
//!
//! Provides joints, skeletons in rest pose, flat keyframe tracks and clips,
//! and humanoid rigs that label skeleton joints with canonical bone roles.

mod animation;
mod asset;
mod error;
mod humanoid;
mod skeleton;
mod transform;

pub use animation::{AnimationClip, Channel, KeyframeTrack, PropertyKind, UNIT_TOLERANCE};
pub use asset::SourceAsset;
pub use error::{ChannelError, RigError, SkeletonError, TrackError};
pub use humanoid::{CoordinateConvention, HumanBone, HumanoidRig, UnknownHumanBone};
pub use skeleton::{Joint, JointId, Skeleton};
pub use transform::Transform;
