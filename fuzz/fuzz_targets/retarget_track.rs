#![no_main]

use glam::Vec3;
use libfuzzer_sys::fuzz_target;
use rhizome_resin_retarget::{RetargetConfig, retarget};
use rhizome_resin_rig::{
    AnimationClip, CoordinateConvention, HumanoidRig, Joint, KeyframeTrack, Skeleton, SourceAsset,
    Transform,
};

fn skeleton(hips: &str, spine: &str) -> Skeleton {
    let mut skel = Skeleton::new();
    let root = skel.add_joint(
        Joint::new(hips).with_local_transform(Transform::from_translation(Vec3::Y)),
    );
    skel.add_joint(Joint::new(spine).with_parent(root));
    skel
}

fuzz_target!(|data: &[u8]| {
    // Arbitrary floats, split between keyframe times and sample values.
    let floats: Vec<f32> = data
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    let split = floats.len() / 5;
    let times = floats[..split].to_vec();
    let values = floats[split..].to_vec();

    let clip = AnimationClip::new("mixamo.com", 1.0)
        .with_track(KeyframeTrack::new(
            "mixamorigSpine.quaternion",
            times.clone(),
            values.clone(),
        ))
        .with_track(KeyframeTrack::new("mixamorigHips.position", times, values));
    let source = SourceAsset::new(skeleton("mixamorigHips", "mixamorigSpine")).with_clip(clip);

    let Ok(rig) = HumanoidRig::new(skeleton("hips", "spine"), CoordinateConvention::Legacy) else {
        return;
    };
    let rig = rig.with_canonical_names();

    // retarget should never panic on any sample data
    let result = retarget(&source, &rig, &RetargetConfig::new().with_log_warnings(false));
    if let Some(clip) = result.clip() {
        assert!(clip.tracks.iter().all(|t| t.values.iter().all(|v| v.is_finite())));
    }
});
