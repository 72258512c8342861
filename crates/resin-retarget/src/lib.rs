//! Humanoid animation retargeting for resin.
//!
//! Moves a clip authored for one skeleton onto a differently named, posed and
//! proportioned humanoid rig:
//!
//! 1. source joint names resolve to [`HumanBone`](rhizome_resin_rig::HumanBone)
//!    roles through a [`BoneMap`];
//! 2. rotation samples are re-expressed against the source rest pose
//!    (`P · q · R⁻¹`);
//! 3. position samples are scaled by the ratio of hip heights;
//! 4. both are adjusted for the target's [`CoordinateConvention`](rhizome_resin_rig::CoordinateConvention).
//!
//! ```ignore
//! use rhizome_resin_retarget::{RetargetConfig, retarget};
//!
//! let result = retarget(&mixamo_asset, &avatar_rig, &RetargetConfig::default());
//! for warning in &result.warnings {
//!     println!("dropped {warning}");
//! }
//! let clip = result.into_clip();
//! ```

mod assemble;
mod bone_map;
mod config;
mod error;
mod position;
mod rest_pose;
mod retarget;
mod rotation;
mod scale;

pub use assemble::{RetargetedTrack, assemble};
pub use bone_map::{BoneMap, MIXAMO_BONES};
pub use config::{DEFAULT_CLIP_NAME, RetargetConfig, ScaleFailurePolicy};
pub use error::{ConfigError, RetargetError, RetargetWarning, RigSide, ScaleError, WarningReason};
pub use position::{retarget_position, retarget_positions};
pub use rest_pose::{
    RestPose, RestPoseCache, parent_rest_world_rotation, rest_pose, rest_world_rotation,
};
pub use retarget::{RetargetResult, Retargeter, retarget};
pub use rotation::{convert_rotation, retarget_rotation, retarget_rotations};
pub use scale::{compute_scale, hip_height};
