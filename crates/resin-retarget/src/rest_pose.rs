//! World-space rest orientations of joints.

use glam::Quat;
use rhizome_resin_rig::Skeleton;
use std::collections::HashMap;

/// Rest orientation of a joint and of its parent, both in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestPose {
    /// The joint's own world rest rotation.
    pub rotation: Quat,
    /// The parent's world rest rotation (identity for the root).
    pub parent_rotation: Quat,
}

/// World rest rotation of the named joint.
pub fn rest_world_rotation(skeleton: &Skeleton, joint: &str) -> Option<Quat> {
    let id = skeleton.find_joint(joint)?;
    Some(skeleton.world_rotation(id))
}

/// World rest rotation of the named joint's parent.
///
/// Identity when the joint is the root. A root still sits under the
/// skeleton's scene origin, but the origin rotation applies equally to the
/// joint and is not part of the parent chain.
pub fn parent_rest_world_rotation(skeleton: &Skeleton, joint: &str) -> Option<Quat> {
    let id = skeleton.find_joint(joint)?;
    let parent = skeleton.joint(id)?.parent;
    Some(parent.map_or(Quat::IDENTITY, |p| skeleton.world_rotation(p)))
}

/// Both rest rotations for the named joint.
pub fn rest_pose(skeleton: &Skeleton, joint: &str) -> Option<RestPose> {
    Some(RestPose {
        rotation: rest_world_rotation(skeleton, joint)?,
        parent_rotation: parent_rest_world_rotation(skeleton, joint)?,
    })
}

/// Per-call memo of resolved rest poses.
///
/// Clips usually carry a rotation and a position track for the same joint;
/// the rest pose is resolved once. Missing joints are remembered too.
#[derive(Debug)]
pub struct RestPoseCache<'a> {
    skeleton: &'a Skeleton,
    poses: HashMap<String, Option<RestPose>>,
}

impl<'a> RestPoseCache<'a> {
    /// Creates an empty cache over a skeleton.
    pub fn new(skeleton: &'a Skeleton) -> Self {
        Self {
            skeleton,
            poses: HashMap::new(),
        }
    }

    /// Resolves (or recalls) the rest pose of a joint.
    pub fn get(&mut self, joint: &str) -> Option<RestPose> {
        if let Some(&pose) = self.poses.get(joint) {
            return pose;
        }
        let pose = rest_pose(self.skeleton, joint);
        self.poses.insert(joint.to_string(), pose);
        pose
    }

    /// Number of distinct joints resolved so far.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Returns true if nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}
