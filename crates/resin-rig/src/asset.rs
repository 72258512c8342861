//! Loaded source assets: a skeleton plus the clips authored for it.

use crate::animation::AnimationClip;
use crate::skeleton::Skeleton;

/// A skeleton and its animation clips, as produced by a format loader.
#[derive(Debug, Clone, Default)]
pub struct SourceAsset {
    /// The rig the clips were authored for.
    pub skeleton: Skeleton,
    /// Named clips.
    pub clips: Vec<AnimationClip>,
}

impl SourceAsset {
    /// Creates an asset with no clips.
    pub fn new(skeleton: Skeleton) -> Self {
        Self {
            skeleton,
            clips: Vec::new(),
        }
    }

    /// Adds a clip.
    pub fn with_clip(mut self, clip: AnimationClip) -> Self {
        self.clips.push(clip);
        self
    }

    /// Finds a clip by exact name.
    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.iter().find(|c| c.name == name)
    }
}
