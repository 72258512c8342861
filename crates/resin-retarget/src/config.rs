//! Retarget options.

use crate::error::ConfigError;
use rhizome_resin_rig::HumanBone;
use std::collections::BTreeMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clip name used by Mixamo exports.
pub const DEFAULT_CLIP_NAME: &str = "mixamo.com";

/// What to do when the hip-height scale cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ScaleFailurePolicy {
    /// Fail the whole call, rotation tracks included.
    #[default]
    AbortClip,
    /// Retarget rotation tracks and drop position tracks with a warning.
    SkipPositionTracks,
}

/// Options for one retarget call.
///
/// With the `serde` feature this reads from camelCase documents such as
/// `{"customBoneMap": {"Hip": "hips"}, "logWarnings": false}`; missing keys
/// take their defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RetargetConfig {
    /// Source joint name overrides, merged over the default bone map.
    pub custom_bone_map: BTreeMap<String, HumanBone>,
    /// Emit each warning through `tracing` as well as returning it.
    pub log_warnings: bool,
    /// Name of the source clip to retarget.
    pub animation_clip_name: String,
    /// Behavior when hip heights cannot be measured.
    pub scale_failure: ScaleFailurePolicy,
}

impl Default for RetargetConfig {
    fn default() -> Self {
        Self {
            custom_bone_map: BTreeMap::new(),
            log_warnings: true,
            animation_clip_name: DEFAULT_CLIP_NAME.to_string(),
            scale_failure: ScaleFailurePolicy::AbortClip,
        }
    }
}

impl RetargetConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bone map override.
    pub fn with_bone(mut self, source_joint: impl Into<String>, bone: HumanBone) -> Self {
        self.custom_bone_map.insert(source_joint.into(), bone);
        self
    }

    /// Sets the clip to retarget.
    pub fn with_clip_name(mut self, name: impl Into<String>) -> Self {
        self.animation_clip_name = name.into();
        self
    }

    /// Enables or disables warning logging.
    pub fn with_log_warnings(mut self, log: bool) -> Self {
        self.log_warnings = log;
        self
    }

    /// Sets the scale failure policy.
    pub fn with_scale_failure(mut self, policy: ScaleFailurePolicy) -> Self {
        self.scale_failure = policy;
        self
    }

    /// Checks the options before a call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation_clip_name.is_empty() {
            return Err(ConfigError::EmptyClipName);
        }
        if let Some(&bone) = self.custom_bone_map.get("") {
            return Err(ConfigError::EmptyOverrideKey(bone));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RetargetConfig::default();
        assert!(config.custom_bone_map.is_empty());
        assert!(config.log_warnings);
        assert_eq!(config.animation_clip_name, "mixamo.com");
        assert_eq!(config.scale_failure, ScaleFailurePolicy::AbortClip);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_empty_clip_name() {
        let config = RetargetConfig::new().with_clip_name("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyClipName));
    }

    #[test]
    fn test_validate_empty_override_key() {
        let config = RetargetConfig::new().with_bone("", HumanBone::Hips);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyOverrideKey(HumanBone::Hips))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let config = RetargetConfig::from_json(
            r#"{
                "customBoneMap": { "Hip": "hips", "L_Arm": "leftUpperArm" },
                "logWarnings": false,
                "scaleFailure": "skipPositionTracks"
            }"#,
        )
        .unwrap();

        assert_eq!(config.custom_bone_map.get("Hip"), Some(&HumanBone::Hips));
        assert_eq!(
            config.custom_bone_map.get("L_Arm"),
            Some(&HumanBone::LeftUpperArm)
        );
        assert!(!config.log_warnings);
        assert_eq!(config.animation_clip_name, DEFAULT_CLIP_NAME);
        assert_eq!(config.scale_failure, ScaleFailurePolicy::SkipPositionTracks);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_rejects_unknown_bone() {
        let result = RetargetConfig::from_json(r#"{ "customBoneMap": { "Hip": "pelvis" } }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_validates() {
        let result = RetargetConfig::from_json(r#"{ "animationClipName": "" }"#);
        assert_eq!(result, Err(ConfigError::EmptyClipName));
    }
}
