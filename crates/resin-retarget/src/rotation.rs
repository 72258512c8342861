//! Rotation track retargeting.

use crate::rest_pose::RestPose;
use glam::Quat;
use rhizome_resin_rig::CoordinateConvention;

/// Re-expresses one sample in the target's rest frame: `P · q · R⁻¹`.
pub fn retarget_rotation(rest: &RestPose, q: Quat) -> Quat {
    rest.parent_rotation * q * rest.rotation.inverse()
}

/// Adjusts a stored rotation for the target's axis convention.
///
/// The legacy convention negates the even-indexed stored components (x and
/// z), which is the same rotation as negating y and w.
pub fn convert_rotation(q: Quat, convention: CoordinateConvention) -> Quat {
    match convention {
        CoordinateConvention::Legacy => Quat::from_xyzw(-q.x, q.y, -q.z, q.w),
        CoordinateConvention::Modern => q,
    }
}

/// Retargets a flat `x, y, z, w` sample buffer.
///
/// Every sample is transformed independently; the result has the same
/// length as the input. A trailing partial sample is dropped.
pub fn retarget_rotations(
    values: &[f32],
    rest: &RestPose,
    convention: CoordinateConvention,
) -> Vec<f32> {
    values
        .chunks_exact(4)
        .flat_map(|sample| {
            let q = retarget_rotation(rest, Quat::from_slice(sample));
            convert_rotation(q, convention).to_array()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const IDENTITY_REST: RestPose = RestPose {
        rotation: Quat::IDENTITY,
        parent_rotation: Quat::IDENTITY,
    };

    #[test]
    fn test_identity_rest_is_passthrough() {
        let q = Quat::from_rotation_x(0.4) * Quat::from_rotation_y(-1.2);
        assert!(retarget_rotation(&IDENTITY_REST, q).abs_diff_eq(q, 1e-5));
    }

    #[test]
    fn test_rest_cancellation() {
        let rest = RestPose {
            rotation: Quat::from_rotation_z(FRAC_PI_2),
            parent_rotation: Quat::IDENTITY,
        };
        let out = retarget_rotation(&rest, rest.rotation);
        assert!(out.abs_diff_eq(Quat::IDENTITY, 1e-5));
    }

    #[test]
    fn test_parent_rest_is_reimposed() {
        let parent = Quat::from_rotation_y(FRAC_PI_2);
        let rest = RestPose {
            rotation: parent,
            parent_rotation: parent,
        };
        // Joint at rest under a rotated parent: world orientation == parent's.
        let out = retarget_rotation(&rest, parent);
        assert!(out.abs_diff_eq(parent, 1e-5));
    }

    #[test]
    fn test_legacy_negates_x_and_z() {
        let q = Quat::from_xyzw(0.1, 0.2, 0.3, 0.927_362);
        let out = convert_rotation(q, CoordinateConvention::Legacy);
        assert_eq!(out.to_array(), [-0.1, 0.2, -0.3, 0.927_362]);
        assert_eq!(convert_rotation(q, CoordinateConvention::Modern), q);
    }

    #[test]
    fn test_legacy_equals_half_turn_about_y() {
        let q = Quat::from_rotation_x(0.5);
        let flip = Quat::from_rotation_y(std::f32::consts::PI);
        let expected = flip * q * flip.inverse();
        let out = convert_rotation(q, CoordinateConvention::Legacy);
        // Same rotation, possibly opposite sign.
        assert!(out.dot(expected).abs() > 1.0 - 1e-5);
    }

    #[test]
    fn test_buffer_matches_per_sample_conversion() {
        let rest = RestPose {
            rotation: Quat::from_rotation_z(0.6),
            parent_rotation: Quat::from_rotation_y(-0.4),
        };
        let q = Quat::from_rotation_x(1.1);
        let expected = convert_rotation(retarget_rotation(&rest, q), CoordinateConvention::Legacy);

        let out = retarget_rotations(&q.to_array(), &rest, CoordinateConvention::Legacy);
        assert_eq!(out, expected.to_array());
    }

    #[test]
    fn test_buffer_preserves_sample_count_and_norm() {
        let rest = RestPose {
            rotation: Quat::from_rotation_x(0.3),
            parent_rotation: Quat::from_rotation_z(-0.8),
        };
        let samples = [
            Quat::IDENTITY,
            Quat::from_rotation_y(1.0),
            Quat::from_rotation_x(2.5) * Quat::from_rotation_z(0.1),
        ];
        let values: Vec<f32> = samples.iter().flat_map(|q| q.to_array()).collect();

        for convention in [CoordinateConvention::Modern, CoordinateConvention::Legacy] {
            let out = retarget_rotations(&values, &rest, convention);
            assert_eq!(out.len(), values.len());
            for sample in out.chunks_exact(4) {
                assert!((Quat::from_slice(sample).length() - 1.0).abs() < 1e-4);
            }
        }
    }
}
