//! Uniform position scale from hip heights.

use crate::error::{RigSide, ScaleError};
use rhizome_resin_rig::{HumanoidRig, JointId, Skeleton};

/// Vertical distance between a joint and the skeleton's scene origin.
pub fn hip_height(skeleton: &Skeleton, hips: JointId) -> f32 {
    let hips_y = skeleton.world_position(hips).y;
    let origin_y = skeleton.origin().translation.y;
    (hips_y - origin_y).abs()
}

/// Computes `target hip height / source hip height`.
///
/// `source_hips` names the hip joint in the source skeleton; the target's
/// hip joint is its assigned [`HumanBone::Hips`](rhizome_resin_rig::HumanBone::Hips).
pub fn compute_scale(
    source: &Skeleton,
    source_hips: &str,
    target: &HumanoidRig,
) -> Result<f32, ScaleError> {
    let source_id = source
        .find_joint(source_hips)
        .ok_or(ScaleError::MissingSourceHips)?;
    let target_id = target.hips().ok_or(ScaleError::MissingTargetHips)?;

    let source_height = checked_height(hip_height(source, source_id), RigSide::Source)?;
    let target_height = checked_height(hip_height(target.skeleton(), target_id), RigSide::Target)?;

    let scale = target_height / source_height;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(ScaleError::NonFiniteScale)
    }
}

fn checked_height(height: f32, rig: RigSide) -> Result<f32, ScaleError> {
    if height.is_finite() && height > 0.0 {
        Ok(height)
    } else {
        Err(ScaleError::DegenerateHeight { rig, height })
    }
}
