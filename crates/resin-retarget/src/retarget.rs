//! The retarget pipeline: locate, scale, per-track transform, assemble.

use crate::assemble::{RetargetedTrack, assemble};
use crate::bone_map::BoneMap;
use crate::config::{RetargetConfig, ScaleFailurePolicy};
use crate::error::{ConfigError, RetargetError, RetargetWarning, ScaleError, WarningReason};
use crate::position::retarget_positions;
use crate::rest_pose::RestPoseCache;
use crate::rotation::retarget_rotations;
use crate::scale::compute_scale;
use rhizome_resin_rig::{
    AnimationClip, ChannelError, HumanBone, HumanoidRig, KeyframeTrack, PropertyKind, SourceAsset,
};

/// Outcome of one retarget call.
///
/// Holds either the retargeted clip or the terminal failure, plus every
/// track-level warning collected before the call ended.
#[derive(Debug, Clone, PartialEq)]
pub struct RetargetResult {
    /// The clip, or why none was produced.
    pub outcome: Result<AnimationClip, RetargetError>,
    /// Dropped tracks, in source order.
    pub warnings: Vec<RetargetWarning>,
}

impl RetargetResult {
    fn failure(error: RetargetError, warnings: Vec<RetargetWarning>) -> Self {
        Self {
            outcome: Err(error),
            warnings,
        }
    }

    /// Returns true if a clip was produced.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The retargeted clip, if any.
    pub fn clip(&self) -> Option<&AnimationClip> {
        self.outcome.as_ref().ok()
    }

    /// The terminal failure, if any.
    pub fn error(&self) -> Option<&RetargetError> {
        self.outcome.as_ref().err()
    }

    /// Consumes the result, returning the clip.
    pub fn into_clip(self) -> Option<AnimationClip> {
        self.outcome.ok()
    }
}

enum TrackOutcome {
    Retargeted(RetargetedTrack),
    Dropped(RetargetWarning),
}

/// A validated configuration with its bone map merged, reusable across calls.
#[derive(Debug, Clone)]
pub struct Retargeter {
    config: RetargetConfig,
    bone_map: BoneMap,
}

impl Retargeter {
    /// Validates `config` and merges its bone map overrides.
    pub fn new(config: RetargetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bone_map = BoneMap::with_overrides(&config.custom_bone_map);
        Ok(Self { config, bone_map })
    }

    /// The configuration this retargeter was built with.
    pub fn config(&self) -> &RetargetConfig {
        &self.config
    }

    /// The merged bone map.
    pub fn bone_map(&self) -> &BoneMap {
        &self.bone_map
    }

    /// Retargets the configured clip of `source` onto `target`.
    #[tracing::instrument(skip_all, fields(clip = %self.config.animation_clip_name))]
    pub fn retarget(&self, source: &SourceAsset, target: &HumanoidRig) -> RetargetResult {
        let mut warnings = Vec::new();
        let outcome = self.run(source, target, &mut warnings);

        if self.config.log_warnings {
            for warning in &warnings {
                tracing::warn!(joint = %warning.joint, reason = %warning.reason, "dropped track");
            }
            if let Err(error) = &outcome {
                tracing::error!(%error, "retarget failed");
            }
        }

        RetargetResult { outcome, warnings }
    }

    fn run(
        &self,
        source: &SourceAsset,
        target: &HumanoidRig,
        warnings: &mut Vec<RetargetWarning>,
    ) -> Result<AnimationClip, RetargetError> {
        let name = &self.config.animation_clip_name;
        let clip = source
            .clip(name)
            .ok_or_else(|| RetargetError::ClipNotFound { name: name.clone() })?;
        source.skeleton.validate()?;

        let scale = match self.scale(source, target) {
            Ok(scale) => {
                tracing::debug!(scale, "resolved hip scale");
                Some(scale)
            }
            Err(error) => match self.config.scale_failure {
                ScaleFailurePolicy::AbortClip => return Err(error.into()),
                ScaleFailurePolicy::SkipPositionTracks => {
                    tracing::debug!(%error, "hip scale undefined, skipping position tracks");
                    None
                }
            },
        };

        let mut rest_poses = RestPoseCache::new(&source.skeleton);
        let mut tracks = Vec::with_capacity(clip.tracks.len());
        for track in &clip.tracks {
            match self.retarget_track(track, target, scale, &mut rest_poses)? {
                TrackOutcome::Retargeted(track) => tracks.push(track),
                TrackOutcome::Dropped(warning) => warnings.push(warning),
            }
        }

        tracing::debug!(
            tracks = tracks.len(),
            dropped = warnings.len(),
            "assembled clip"
        );
        Ok(assemble(clip.name.clone(), clip.duration, tracks))
    }

    fn scale(&self, source: &SourceAsset, target: &HumanoidRig) -> Result<f32, ScaleError> {
        let source_hips = self
            .bone_map
            .source_for(HumanBone::Hips, &source.skeleton)
            .ok_or(ScaleError::MissingSourceHips)?;
        compute_scale(&source.skeleton, source_hips, target)
    }

    fn retarget_track(
        &self,
        track: &KeyframeTrack,
        target: &HumanoidRig,
        scale: Option<f32>,
        rest_poses: &mut RestPoseCache<'_>,
    ) -> Result<TrackOutcome, RetargetError> {
        let channel = match track.channel() {
            Ok(channel) => channel,
            Err(ChannelError::UnsupportedProperty(property)) => {
                let joint = track
                    .name
                    .rsplit_once('.')
                    .map_or(track.name.as_str(), |(joint, _)| joint);
                return Ok(dropped(joint, WarningReason::UnsupportedProperty(property)));
            }
            Err(error) => return Err(error.into()),
        };

        let Some(bone) = self.bone_map.resolve(&channel.joint) else {
            return Ok(dropped(&channel.joint, WarningReason::UnmappedBone));
        };
        let Some(target_joint) = target.joint(bone) else {
            return Ok(dropped(
                &channel.joint,
                WarningReason::TargetJointMissing(bone),
            ));
        };
        let Some(rest) = rest_poses.get(&channel.joint) else {
            return Ok(dropped(&channel.joint, WarningReason::SourceJointMissing));
        };

        track
            .validate(channel.property)
            .map_err(|source| RetargetError::InternalFault {
                channel: track.name.clone(),
                source,
            })?;

        let values = match channel.property {
            PropertyKind::Rotation => retarget_rotations(&track.values, &rest, target.convention()),
            PropertyKind::Position => {
                let Some(scale) = scale else {
                    return Ok(dropped(&channel.joint, WarningReason::PositionSkipped));
                };
                retarget_positions(&track.values, scale, target.convention())
            }
        };

        if values.iter().any(|v| !v.is_finite()) {
            return Err(RetargetError::NonFiniteOutput {
                channel: track.name.clone(),
            });
        }

        Ok(TrackOutcome::Retargeted(RetargetedTrack {
            target_joint: target_joint.name.clone(),
            property: channel.property,
            times: track.times.clone(),
            values,
        }))
    }
}

fn dropped(joint: &str, reason: WarningReason) -> TrackOutcome {
    TrackOutcome::Dropped(RetargetWarning::new(joint, reason))
}

/// Retargets the clip named in `config` from `source` onto `target`.
///
/// Never panics on bad input: configuration, lookup, scale and track data
/// problems all come back inside the [`RetargetResult`].
pub fn retarget(
    source: &SourceAsset,
    target: &HumanoidRig,
    config: &RetargetConfig,
) -> RetargetResult {
    match Retargeter::new(config.clone()) {
        Ok(retargeter) => retargeter.retarget(source, target),
        Err(error) => {
            if config.log_warnings {
                tracing::error!(%error, "invalid retarget configuration");
            }
            RetargetResult::failure(error.into(), Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use rhizome_resin_rig::{
        CoordinateConvention, Joint, Skeleton, SkeletonError, Transform, TrackError,
    };

    fn source() -> SourceAsset {
        let mut skel = Skeleton::new();
        let hips = skel.add_joint(
            Joint::new("mixamorigHips")
                .with_local_transform(Transform::from_translation(Vec3::new(0.0, 100.0, 0.0))),
        );
        skel.add_joint(Joint::new("mixamorigSpine").with_parent(hips));

        let clip = AnimationClip::new("mixamo.com", 1.0)
            .with_track(KeyframeTrack::position(
                "mixamorigHips",
                vec![0.0, 1.0],
                &[Vec3::new(0.0, 100.0, 0.0), Vec3::new(10.0, 100.0, 0.0)],
            ))
            .with_track(KeyframeTrack::rotation(
                "mixamorigSpine",
                vec![0.0, 1.0],
                &[Quat::IDENTITY, Quat::from_rotation_x(0.5)],
            ));

        SourceAsset::new(skel).with_clip(clip)
    }

    fn target(convention: CoordinateConvention) -> HumanoidRig {
        let mut skel = Skeleton::new();
        let hips = skel.add_joint(
            Joint::new("J_Hips")
                .with_local_transform(Transform::from_translation(Vec3::new(0.0, 1.0, 0.0))),
        );
        skel.add_joint(Joint::new("J_Spine").with_parent(hips));

        HumanoidRig::new(skel, convention)
            .unwrap()
            .with_bone(HumanBone::Hips, "J_Hips")
            .unwrap()
            .with_bone(HumanBone::Spine, "J_Spine")
            .unwrap()
    }

    fn quiet() -> RetargetConfig {
        RetargetConfig::new().with_log_warnings(false)
    }

    #[test]
    fn test_retarget_basic() {
        let result = retarget(&source(), &target(CoordinateConvention::Modern), &quiet());
        let clip = result.clip().unwrap();

        assert!(result.warnings.is_empty());
        assert_eq!(clip.track_count(), 2);
        let hips = clip.track("J_Hips.position").unwrap();
        assert!((hips.values[1] - 1.0).abs() < 1e-5);
        assert!((hips.values[3] - 0.1).abs() < 1e-5);
        assert!(clip.track("J_Spine.quaternion").is_some());
    }

    #[test]
    fn test_invalid_config() {
        let config = quiet().with_clip_name("");
        let result = retarget(&source(), &target(CoordinateConvention::Modern), &config);
        assert_eq!(
            result.error(),
            Some(&RetargetError::InvalidConfig(ConfigError::EmptyClipName))
        );
    }

    #[test]
    fn test_malformed_track_is_internal_fault() {
        let mut asset = source();
        asset.clips[0].tracks[1].values.pop();

        let result = retarget(&asset, &target(CoordinateConvention::Modern), &quiet());
        assert!(matches!(
            result.error(),
            Some(RetargetError::InternalFault {
                source: TrackError::ValueCount { .. },
                ..
            })
        ));
        assert!(result.clip().is_none());
    }

    #[test]
    fn test_overflowing_position_is_non_finite_output() {
        let mut asset = source();
        asset.clips[0].tracks[0] = KeyframeTrack::position(
            "mixamorigHips",
            vec![0.0],
            &[Vec3::new(0.0, f32::MAX * 0.9, 0.0)],
        );
        // Hips at 150 against a source at 100 scale positions by 1.5.
        let target = HumanoidRig::new(
            {
                let mut skel = Skeleton::new();
                let hips = skel.add_joint(
                    Joint::new("J_Hips").with_local_transform(Transform::from_translation(
                        Vec3::new(0.0, 150.0, 0.0),
                    )),
                );
                skel.add_joint(Joint::new("J_Spine").with_parent(hips));
                skel
            },
            CoordinateConvention::Modern,
        )
        .unwrap()
        .with_bone(HumanBone::Hips, "J_Hips")
        .unwrap();

        let result = retarget(&asset, &target, &quiet());
        assert!(matches!(
            result.error(),
            Some(RetargetError::NonFiniteOutput { channel }) if channel == "mixamorigHips.position"
        ));
        assert!(result.clip().is_none());
    }

    #[test]
    fn test_invalid_source_skeleton() {
        let mut skel = Skeleton::new();
        let hips = skel.add_joint(
            Joint::new("mixamorigHips")
                .with_local_transform(Transform::from_translation(Vec3::new(0.0, 100.0, 0.0))),
        );
        skel.add_joint(Joint::new("mixamorigSpine").with_parent(hips));
        skel.add_joint(Joint::new("mixamorigSpine").with_parent(hips));
        let asset = SourceAsset {
            skeleton: skel,
            ..source()
        };

        let result = retarget(&asset, &target(CoordinateConvention::Modern), &quiet());
        assert_eq!(
            result.error(),
            Some(&RetargetError::InvalidSourceSkeleton(
                SkeletonError::DuplicateName("mixamorigSpine".into())
            ))
        );
        assert!(result.clip().is_none());
    }

    #[test]
    fn test_malformed_channel_name() {
        let mut asset = source();
        asset.clips[0].tracks[0].name = "mixamorigHips".into();

        let result = retarget(&asset, &target(CoordinateConvention::Modern), &quiet());
        assert!(matches!(
            result.error(),
            Some(RetargetError::InvalidChannel(ChannelError::MissingProperty(_)))
        ));
    }

    #[test]
    fn test_unsupported_property_is_dropped() {
        let mut asset = source();
        asset.clips[0].tracks.push(KeyframeTrack::new(
            "mixamorigSpine.scale",
            vec![0.0],
            vec![1.0, 1.0, 1.0],
        ));

        let result = retarget(&asset, &target(CoordinateConvention::Modern), &quiet());
        assert_eq!(result.clip().unwrap().track_count(), 2);
        assert_eq!(
            result.warnings,
            vec![RetargetWarning::new(
                "mixamorigSpine",
                WarningReason::UnsupportedProperty("scale".into())
            )]
        );
    }

    #[test]
    fn test_source_joint_missing() {
        let mut asset = source();
        asset.clips[0].tracks.push(KeyframeTrack::rotation(
            "mixamorigHead",
            vec![0.0],
            &[Quat::IDENTITY],
        ));
        let target = HumanoidRig::new(
            {
                let mut skel = Skeleton::new();
                let hips = skel.add_joint(
                    Joint::new("J_Hips")
                        .with_local_transform(Transform::from_translation(Vec3::Y)),
                );
                skel.add_joint(Joint::new("J_Head").with_parent(hips));
                skel
            },
            CoordinateConvention::Modern,
        )
        .unwrap()
        .with_bone(HumanBone::Hips, "J_Hips")
        .unwrap()
        .with_bone(HumanBone::Head, "J_Head")
        .unwrap();

        let result = retarget(&asset, &target, &quiet());
        assert!(result.is_ok());
        assert!(result.warnings.contains(&RetargetWarning::new(
            "mixamorigHead",
            WarningReason::SourceJointMissing
        )));
    }

    #[test]
    fn test_skip_position_tracks_policy() {
        // Hips sit on the scene origin, so the target hip height is zero.
        let target = HumanoidRig::new(
            {
                let mut skel = Skeleton::new();
                let hips = skel.add_joint(Joint::new("J_Hips"));
                skel.add_joint(Joint::new("J_Spine").with_parent(hips));
                skel
            },
            CoordinateConvention::Modern,
        )
        .unwrap()
        .with_bone(HumanBone::Hips, "J_Hips")
        .unwrap()
        .with_bone(HumanBone::Spine, "J_Spine")
        .unwrap();

        let strict = retarget(&source(), &target, &quiet());
        assert!(matches!(
            strict.error(),
            Some(RetargetError::ScaleUndefined(ScaleError::DegenerateHeight { .. }))
        ));
        assert!(strict.clip().is_none());

        let relaxed = retarget(
            &source(),
            &target,
            &quiet().with_scale_failure(ScaleFailurePolicy::SkipPositionTracks),
        );
        let clip = relaxed.clip().unwrap();
        assert_eq!(clip.track_count(), 1);
        assert!(clip.track("J_Spine.quaternion").is_some());
        assert_eq!(
            relaxed.warnings,
            vec![RetargetWarning::new(
                "mixamorigHips",
                WarningReason::PositionSkipped
            )]
        );
    }

    #[test]
    fn test_retargeter_is_reusable() {
        let retargeter = Retargeter::new(quiet()).unwrap();
        let source = source();
        let target = target(CoordinateConvention::Legacy);

        let first = retargeter.retarget(&source, &target);
        let second = retargeter.retarget(&source, &target);
        assert_eq!(first, second);
        assert_eq!(retargeter.bone_map().len(), 52);
    }

    #[test]
    fn test_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Retargeter>();
        assert_send_sync::<RetargetResult>();
    }
}
