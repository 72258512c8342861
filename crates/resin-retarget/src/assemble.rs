//! Output clip assembly.

use rhizome_resin_rig::{AnimationClip, Channel, KeyframeTrack, PropertyKind};

/// A retargeted track before it is placed in a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct RetargetedTrack {
    /// Name of the target joint the samples drive.
    pub target_joint: String,
    /// Which property they animate.
    pub property: PropertyKind,
    /// Keyframe times, copied unchanged from the source track.
    pub times: Vec<f32>,
    /// Transformed samples.
    pub values: Vec<f32>,
}

impl RetargetedTrack {
    /// Output channel name, `<target joint>.<property>`.
    pub fn channel_name(&self) -> String {
        Channel::new(self.target_joint.as_str(), self.property).to_string()
    }
}

/// Collects retargeted tracks into a clip, in the given order.
pub fn assemble(
    name: impl Into<String>,
    duration: f32,
    tracks: impl IntoIterator<Item = RetargetedTrack>,
) -> AnimationClip {
    AnimationClip {
        name: name.into(),
        duration,
        tracks: tracks
            .into_iter()
            .map(|track| KeyframeTrack::new(track.channel_name(), track.times, track.values))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_names_and_order() {
        let tracks = vec![
            RetargetedTrack {
                target_joint: "J_Bip_C_Hips".into(),
                property: PropertyKind::Position,
                times: vec![0.0],
                values: vec![0.0, 1.0, 0.0],
            },
            RetargetedTrack {
                target_joint: "J_Bip_C_Hips".into(),
                property: PropertyKind::Rotation,
                times: vec![0.0],
                values: vec![0.0, 0.0, 0.0, 1.0],
            },
        ];

        let clip = assemble("walk", 2.5, tracks);
        assert_eq!(clip.name, "walk");
        assert_eq!(clip.duration, 2.5);
        let names: Vec<_> = clip.tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["J_Bip_C_Hips.position", "J_Bip_C_Hips.quaternion"]);
    }

    #[test]
    fn test_assemble_empty() {
        let clip = assemble("idle", 1.0, Vec::new());
        assert_eq!(clip.track_count(), 0);
        assert_eq!(clip.duration, 1.0);
    }
}
