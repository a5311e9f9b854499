//! Decoding of the packed per-joint component buffer.
//!
//! Each animated joint owns a contiguous window of a frame's component
//! row, holding the present channels of (tx, ty, tz, qx, qy, qz) in that
//! fixed order. Channels absent from the joint's [`ChannelBits`] keep
//! their baseframe value. Rotations store only x/y/z; w is reconstructed
//! from the unit-length constraint.

use glam::{Quat, Vec3};

use crate::types::{ChannelBits, JointPose};

/// Reconstruct the omitted quaternion w from x/y/z.
///
/// The non-negative root is chosen; content authored into the negative
/// hemisphere is not representable in this format.
pub fn restore_quat_w(x: f32, y: f32, z: f32) -> f32 {
    (1.0 - (x * x + y * y + z * z)).max(0.0).sqrt()
}

/// Decode the translation channels present in `bits` from a joint's
/// component window; absent axes keep the baseframe value.
pub fn decode_translation(bits: ChannelBits, base: Vec3, comps: &[f32]) -> Vec3 {
    let mut t = base;
    let mut at = 0;
    if bits.contains(ChannelBits::TX) {
        if let Some(&v) = comps.get(at) {
            t.x = v;
        }
        at += 1;
    }
    if bits.contains(ChannelBits::TY) {
        if let Some(&v) = comps.get(at) {
            t.y = v;
        }
        at += 1;
    }
    if bits.contains(ChannelBits::TZ) {
        if let Some(&v) = comps.get(at) {
            t.z = v;
        }
    }
    t
}

/// Decode the rotation channels present in `bits` from a joint's
/// component window (skipping its stored translation floats); absent axes
/// keep the baseframe value. If any rotation channel is stored, w is
/// recomputed from the decoded x/y/z.
pub fn decode_rotation(bits: ChannelBits, base: Quat, comps: &[f32]) -> Quat {
    if !bits.intersects(ChannelBits::ROTATION) {
        return base;
    }

    let (mut x, mut y, mut z) = (base.x, base.y, base.z);
    let mut at = bits.translation_count();
    if bits.contains(ChannelBits::QX) {
        if let Some(&v) = comps.get(at) {
            x = v;
        }
        at += 1;
    }
    if bits.contains(ChannelBits::QY) {
        if let Some(&v) = comps.get(at) {
            y = v;
        }
        at += 1;
    }
    if bits.contains(ChannelBits::QZ) {
        if let Some(&v) = comps.get(at) {
            z = v;
        }
    }
    Quat::from_xyzw(x, y, z, restore_quat_w(x, y, z))
}

/// Decode a full joint pose from its component window
pub fn decode_pose(bits: ChannelBits, base: &JointPose, comps: &[f32]) -> JointPose {
    JointPose {
        rotation: decode_rotation(bits, base.rotation, comps),
        translation: decode_translation(bits, base.translation, comps),
    }
}
