//! Keyframe tracks and animation clips.
//!
//! Tracks store their samples flat, the way animation containers hand them
//! over: one time per keyframe and `width` floats per keyframe.

use crate::error::{ChannelError, TrackError};
use glam::{Quat, Vec3};
use std::cmp::Ordering;
use std::fmt;

/// Largest deviation from norm 1 accepted for a stored rotation sample.
///
/// Retargeting composes samples with unit rest rotations and never
/// renormalizes, so output norms stay within this bound up to rounding.
pub const UNIT_TOLERANCE: f32 = 1e-4;

/// The joint property a track animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PropertyKind {
    /// Orientation, stored as `x, y, z, w` quaternions.
    Rotation,
    /// Translation, stored as `x, y, z` vectors.
    Position,
}

impl PropertyKind {
    /// Floats per keyframe.
    pub fn width(self) -> usize {
        match self {
            PropertyKind::Rotation => 4,
            PropertyKind::Position => 3,
        }
    }

    /// Channel name suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            PropertyKind::Rotation => "quaternion",
            PropertyKind::Position => "position",
        }
    }

    /// Parses a channel name suffix.
    pub fn parse(suffix: &str) -> Option<Self> {
        match suffix {
            "quaternion" => Some(PropertyKind::Rotation),
            "position" => Some(PropertyKind::Position),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A joint name plus the property being animated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Channel {
    /// Joint the track drives.
    pub joint: String,
    /// Property of that joint.
    pub property: PropertyKind,
}

impl Channel {
    /// Creates a channel.
    pub fn new(joint: impl Into<String>, property: PropertyKind) -> Self {
        Self {
            joint: joint.into(),
            property,
        }
    }

    /// Parses `<joint>.<property>`, splitting at the last `.`.
    pub fn parse(name: &str) -> Result<Self, ChannelError> {
        let (joint, suffix) = name
            .rsplit_once('.')
            .ok_or_else(|| ChannelError::MissingProperty(name.to_string()))?;
        if joint.is_empty() {
            return Err(ChannelError::MissingJoint(name.to_string()));
        }
        let property = PropertyKind::parse(suffix)
            .ok_or_else(|| ChannelError::UnsupportedProperty(suffix.to_string()))?;
        Ok(Self::new(joint, property))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.joint, self.property)
    }
}

/// A keyframe stream for one property of one joint.
///
/// The channel is kept as the raw name so that tracks for properties this
/// crate does not model (e.g. `scale`) survive loading and can be reported.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack {
    /// Channel name, `<joint>.<property>`.
    pub name: String,
    /// Keyframe times in seconds.
    pub times: Vec<f32>,
    /// Flat sample values, `times.len() × width` floats.
    pub values: Vec<f32>,
}

impl KeyframeTrack {
    /// Creates a track from a raw channel name.
    pub fn new(name: impl Into<String>, times: Vec<f32>, values: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            times,
            values,
        }
    }

    /// Creates a rotation track from quaternions.
    pub fn rotation(joint: &str, times: Vec<f32>, rotations: &[Quat]) -> Self {
        let values = rotations.iter().flat_map(|q| q.to_array()).collect();
        Self::new(Channel::new(joint, PropertyKind::Rotation).to_string(), times, values)
    }

    /// Creates a position track from vectors.
    pub fn position(joint: &str, times: Vec<f32>, positions: &[Vec3]) -> Self {
        let values = positions.iter().flat_map(|p| p.to_array()).collect();
        Self::new(Channel::new(joint, PropertyKind::Position).to_string(), times, values)
    }

    /// Parses the channel name.
    pub fn channel(&self) -> Result<Channel, ChannelError> {
        Channel::parse(&self.name)
    }

    /// Returns the number of keyframes.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Checks sample layout, ordering, finiteness and quaternion norms.
    pub fn validate(&self, property: PropertyKind) -> Result<(), TrackError> {
        if self.times.is_empty() {
            return Err(TrackError::Empty);
        }

        let width = property.width();
        let expected = self.times.len() * width;
        if self.values.len() != expected {
            return Err(TrackError::ValueCount {
                keyframes: self.times.len(),
                expected,
                got: self.values.len(),
            });
        }

        for (index, pair) in self.times.windows(2).enumerate() {
            if pair[1].partial_cmp(&pair[0]) != Some(Ordering::Greater) {
                return Err(TrackError::NonAscendingTimes {
                    index: index + 1,
                    time: pair[1],
                });
            }
        }

        for (index, (time, sample)) in self
            .times
            .iter()
            .zip(self.values.chunks_exact(width))
            .enumerate()
        {
            if !time.is_finite() || sample.iter().any(|v| !v.is_finite()) {
                return Err(TrackError::NonFinite { index });
            }
            if property == PropertyKind::Rotation {
                let norm = Quat::from_slice(sample).length();
                if (norm - 1.0).abs() > UNIT_TOLERANCE {
                    return Err(TrackError::NonUnitQuaternion { index, norm });
                }
            }
        }

        Ok(())
    }

    /// Iterates samples as quaternions. Trailing partial samples are ignored.
    pub fn rotations(&self) -> impl Iterator<Item = Quat> + '_ {
        self.values.chunks_exact(4).map(Quat::from_slice)
    }

    /// Iterates samples as vectors. Trailing partial samples are ignored.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.values.chunks_exact(3).map(Vec3::from_slice)
    }

    /// Finds the keyframe pair surrounding `time` and the blend factor.
    ///
    /// Returns `None` for a NaN time or an empty track. Unsorted times never
    /// index out of range, though the segment they yield is meaningless.
    fn segment(&self, time: f32) -> Option<(usize, usize, f32)> {
        if time.is_nan() {
            return None;
        }
        let last = self.times.len().checked_sub(1)?;

        if time <= self.times[0] {
            return Some((0, 0, 0.0));
        }
        if time >= self.times[last] {
            return Some((last, last, 0.0));
        }

        let next = self.times.partition_point(|&t| t <= time);
        let curr = next.checked_sub(1)?;
        let t_next = *self.times.get(next)?;
        let t_curr = self.times[curr];
        Some((curr, next, (time - t_curr) / (t_next - t_curr)))
    }

    /// Samples a rotation track at a given time (spherical interpolation).
    pub fn sample_rotation(&self, time: f32) -> Option<Quat> {
        let (a, b, t) = self.segment(time)?;
        let qa = Quat::from_slice(self.values.get(a * 4..a * 4 + 4)?);
        let qb = Quat::from_slice(self.values.get(b * 4..b * 4 + 4)?);
        Some(qa.slerp(qb, t))
    }

    /// Samples a position track at a given time (linear interpolation).
    pub fn sample_position(&self, time: f32) -> Option<Vec3> {
        let (a, b, t) = self.segment(time)?;
        let pa = Vec3::from_slice(self.values.get(a * 3..a * 3 + 3)?);
        let pb = Vec3::from_slice(self.values.get(b * 3..b * 3 + 3)?);
        Some(pa.lerp(pb, t))
    }
}

/// An animation clip containing multiple tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationClip {
    /// Clip name.
    pub name: String,
    /// Clip length in seconds, as authored.
    pub duration: f32,
    /// Tracks in authoring order.
    pub tracks: Vec<KeyframeTrack>,
}

impl AnimationClip {
    /// Creates an empty clip.
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            tracks: Vec::new(),
        }
    }

    /// Adds a track.
    pub fn with_track(mut self, track: KeyframeTrack) -> Self {
        self.tracks.push(track);
        self
    }

    /// Finds a track by channel name.
    pub fn track(&self, name: &str) -> Option<&KeyframeTrack> {
        self.tracks.iter().find(|t| t.name == name)
    }

    /// Returns the number of tracks.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}
