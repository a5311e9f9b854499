//! Common data types shared by the animation parser and samplers

use std::io::{Read, Write};

use bitflags::bitflags;
use glam::{Quat, Vec3};
use md5_data::{ReadExt, WriteExt};

use crate::error::Result;

bitflags! {
    /// Which of a joint's six scalar channels are stored per frame.
    ///
    /// Channels not present in the mask hold their baseframe value for the
    /// whole clip. Present channels are packed in this fixed order:
    /// tx, ty, tz, qx, qy, qz.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ChannelBits: u8 {
        /// Translation X is animated
        const TX = 1 << 0;
        /// Translation Y is animated
        const TY = 1 << 1;
        /// Translation Z is animated
        const TZ = 1 << 2;
        /// Rotation X is animated
        const QX = 1 << 3;
        /// Rotation Y is animated
        const QY = 1 << 4;
        /// Rotation Z is animated
        const QZ = 1 << 5;
    }
}

impl ChannelBits {
    /// All three translation channels
    pub const TRANSLATION: Self = Self::TX.union(Self::TY).union(Self::TZ);
    /// All three rotation channels
    pub const ROTATION: Self = Self::QX.union(Self::QY).union(Self::QZ);

    /// Number of floats this joint stores per frame
    pub fn component_count(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Number of stored translation floats preceding the rotation floats
    pub fn translation_count(self) -> usize {
        self.intersection(Self::TRANSLATION).bits().count_ones() as usize
    }
}

/// One joint's transform: parent-relative rotation plus translation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct JointPose {
    /// Parent-relative rotation
    pub rotation: Quat,
    /// Parent-relative translation
    pub translation: Vec3,
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation: Vec3::ZERO,
        }
    }
}

/// Static per-joint animation metadata for one clip
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct JointAnimInfo {
    /// Index into the shared joint-name table; `None` if unresolved
    pub name_index: Option<usize>,
    /// Index of the parent joint; -1 only for joint 0, the unique root
    pub parent: i32,
    /// Which channels are stored per frame for this joint
    pub bits: ChannelBits,
    /// Offset of this joint's first stored float within a frame's
    /// component row; meaningful only when the clip animates anything
    pub first_component: usize,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Bounds {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Bounds {
    /// Smallest box containing both inputs
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// This box shifted by `-offset` on both corners
    pub fn translated_back(self, offset: Vec3) -> Self {
        Self {
            min: self.min - offset,
            max: self.max - offset,
        }
    }

    /// Read min/max corners as six consecutive little-endian floats
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let min = reader.read_f32x3_le()?;
        let max = reader.read_f32x3_le()?;
        Ok(Self {
            min: Vec3::from_array(min),
            max: Vec3::from_array(max),
        })
    }

    /// Write min/max corners as six consecutive little-endian floats
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_f32x3_le(self.min.to_array())?;
        writer.write_f32x3_le(self.max.to_array())?;
        Ok(())
    }
}

/// Joint hierarchy data supplied by a render model for the bind-time
/// consistency check
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ModelJoint {
    /// Joint name as the model spells it
    pub name: String,
    /// Index of the parent joint; -1 for the root
    pub parent: i32,
}
