//! Position track retargeting.

use glam::Vec3;
use rhizome_resin_rig::CoordinateConvention;

/// Scales one sample and adjusts it for the target's axis convention.
///
/// The legacy convention negates x and z. Height (y) keeps its sign.
pub fn retarget_position(p: Vec3, scale: f32, convention: CoordinateConvention) -> Vec3 {
    let scaled = p * scale;
    match convention {
        CoordinateConvention::Legacy => Vec3::new(-scaled.x, scaled.y, -scaled.z),
        CoordinateConvention::Modern => scaled,
    }
}

/// Retargets a flat `x, y, z` sample buffer.
///
/// Positions are not rebased against rest poses; the only position channel
/// expected on a humanoid is the hip translation.
pub fn retarget_positions(values: &[f32], scale: f32, convention: CoordinateConvention) -> Vec<f32> {
    values
        .chunks_exact(3)
        .flat_map(|sample| retarget_position(Vec3::from_slice(sample), scale, convention).to_array())
        .collect()
}
