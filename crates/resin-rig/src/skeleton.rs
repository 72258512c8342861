//! Skeleton and joint types.

use crate::error::SkeletonError;
use crate::transform::Transform;
use glam::{Quat, Vec3};
use std::collections::HashMap;

/// A joint identifier (index into skeleton).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointId(pub u32);

impl JointId {
    /// Creates a new joint ID.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A joint in a skeleton.
#[derive(Debug, Clone)]
pub struct Joint {
    /// Joint name, unique within its skeleton.
    pub name: String,
    /// Parent joint (None for root).
    pub parent: Option<JointId>,
    /// Rest transform in parent space.
    pub local_transform: Transform,
}

impl Default for Joint {
    fn default() -> Self {
        Self {
            name: String::new(),
            parent: None,
            local_transform: Transform::IDENTITY,
        }
    }
}

impl Joint {
    /// Creates a new root joint with an identity rest transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the parent joint.
    pub fn with_parent(mut self, parent: JointId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the rest transform in parent space.
    pub fn with_local_transform(mut self, transform: Transform) -> Self {
        self.local_transform = transform;
        self
    }
}

/// A skeleton (tree of joints) in its rest pose.
///
/// The skeleton owns its joints; parent links are indices. `origin` is the
/// world transform of the scene node holding the skeleton, so world rest
/// transforms are `origin · root · … · joint`.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    joints: Vec<Joint>,
    names: HashMap<String, JointId>,
    origin: Transform,
}

impl Skeleton {
    /// Creates an empty skeleton at the world origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scene origin transform.
    pub fn with_origin(mut self, origin: Transform) -> Self {
        self.origin = origin;
        self
    }

    /// Returns the scene origin transform.
    pub fn origin(&self) -> Transform {
        self.origin
    }

    /// Adds a joint and returns its ID.
    ///
    /// Parents must be added before their children. Use [`Skeleton::validate`]
    /// to check the invariants once the skeleton is complete.
    pub fn add_joint(&mut self, joint: Joint) -> JointId {
        let id = JointId(self.joints.len() as u32);
        self.names.entry(joint.name.clone()).or_insert(id);
        self.joints.push(joint);
        id
    }

    /// Returns a joint by ID.
    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(id.index())
    }

    /// Finds a joint by name.
    pub fn find_joint(&self, name: &str) -> Option<JointId> {
        self.names.get(name).copied()
    }

    /// Checks the single-root, unique-name and parent-ordering invariants.
    pub fn validate(&self) -> Result<(), SkeletonError> {
        if self.joints.is_empty() {
            return Err(SkeletonError::Empty);
        }

        let roots = self.joints.iter().filter(|j| j.parent.is_none()).count();
        if roots != 1 {
            return Err(SkeletonError::MultipleRoots { count: roots });
        }

        for (i, joint) in self.joints.iter().enumerate() {
            if self.names.get(&joint.name) != Some(&JointId(i as u32)) {
                return Err(SkeletonError::DuplicateName(joint.name.clone()));
            }
            if let Some(parent) = joint.parent.filter(|p| p.index() >= i) {
                return Err(SkeletonError::InvalidParent {
                    joint: joint.name.clone(),
                    parent: parent.0,
                });
            }
        }

        Ok(())
    }

    /// Computes the world transform for a joint in rest pose.
    pub fn world_transform(&self, id: JointId) -> Transform {
        let mut transform = self.origin;
        let mut current = Some(id);

        // Collect chain from joint up to root
        let mut chain = Vec::new();
        while let Some(joint_id) = current {
            // Guard against cycles in unvalidated skeletons
            if chain.len() > self.joints.len() {
                break;
            }
            chain.push(joint_id);
            current = self.joints.get(joint_id.index()).and_then(|j| j.parent);
        }

        for joint_id in chain.into_iter().rev() {
            if let Some(joint) = self.joints.get(joint_id.index()) {
                transform = transform.then(&joint.local_transform);
            }
        }

        transform
    }

    /// World-space rest rotation of a joint.
    pub fn world_rotation(&self, id: JointId) -> Quat {
        self.world_transform(id).rotation
    }

    /// World-space rest position of a joint.
    pub fn world_position(&self, id: JointId) -> Vec3 {
        self.world_transform(id).translation
    }
}
