//! Binary fast-path serialization of parsed animations.
//!
//! The binary file is a little-endian image of a clip that already went
//! through the text parser: counts validated, joint names resolved, root
//! motion extracted, duration computed. Reading one therefore reproduces
//! the text-format results bit for bit. The layout is fixed field order,
//! declared endianness, no padding -- except one trailing float after the
//! component array kept for compatibility with files written by the
//! original exporter.

use std::io::{Read, Write};

use glam::{Quat, Vec3};
use md5_data::{ReadExt, WriteExt};

use crate::clip::Md5Anim;
use crate::error::{AnimError, Result};
use crate::name_table::JointNameTable;
use crate::types::{Bounds, ChannelBits, JointAnimInfo, JointPose};

/// Binary format version byte
pub const BINARY_VERSION: u8 = 101;

/// Magic word: 'B' 'M' 'D' packed above the version byte
pub const BINARY_MAGIC: u32 = ((b'B' as u32) << 24)
    | ((b'M' as u32) << 16)
    | ((b'D' as u32) << 8)
    | (BINARY_VERSION as u32);

/// Check whether a byte buffer starts with the binary magic
pub fn sniff(data: &[u8]) -> bool {
    match data.first_chunk::<4>() {
        Some(head) => u32::from_le_bytes(*head) == BINARY_MAGIC,
        None => false,
    }
}

/// Parse a binary animation. Joint names resolve through `names`; an
/// empty stored name stays unresolved.
pub fn parse<R: Read>(reader: &mut R, name: String, names: &mut JointNameTable) -> Result<Md5Anim> {
    let magic = reader.read_u32_le()?;
    if magic != BINARY_MAGIC {
        return Err(AnimError::InvalidMagic {
            expected: BINARY_MAGIC,
            found: magic,
        });
    }

    // reserved source-timestamp words
    reader.read_u32_le()?;
    reader.read_u32_le()?;

    let num_frames = reader.read_i32_le()?;
    if num_frames <= 0 {
        return Err(AnimError::InvalidFrameCount(num_frames));
    }
    let num_frames = num_frames as usize;

    let frame_rate = reader.read_i32_le()?;
    if frame_rate < 0 {
        return Err(AnimError::InvalidFrameRate(frame_rate));
    }
    let frame_rate = frame_rate as u32;

    let anim_length = reader.read_i32_le()?;
    if anim_length < 0 {
        return Err(AnimError::InvalidArrayCount {
            field: "animation length",
            count: anim_length,
        });
    }

    let num_joints = reader.read_i32_le()?;
    if num_joints <= 0 {
        return Err(AnimError::InvalidJointCount(num_joints));
    }

    let num_animated_components = reader.read_i32_le()?;
    if num_animated_components < 0 || num_animated_components > num_joints * 6 {
        return Err(AnimError::InvalidComponentCount(num_animated_components));
    }
    let num_animated_components = num_animated_components as usize;

    let bounds_count = reader.read_u32_le()? as usize;
    let mut bounds = Vec::with_capacity(bounds_count);
    for _ in 0..bounds_count {
        bounds.push(Bounds::parse(reader)?);
    }

    let joint_count = reader.read_u32_le()? as usize;
    let mut joints = Vec::with_capacity(joint_count);
    for i in 0..joint_count {
        let joint_name = reader.read_string_le()?;
        let name_index = if joint_name.is_empty() {
            None
        } else {
            Some(names.intern(&joint_name))
        };

        let parent = reader.read_i32_le()?;
        if parent >= i as i32 {
            return Err(AnimError::InvalidParent { joint: i, parent });
        }
        if i != 0 && parent < 0 {
            return Err(AnimError::MultipleRoots(i));
        }

        let raw_bits = reader.read_i32_le()?;
        if raw_bits & !0x3F != 0 {
            return Err(AnimError::InvalidAnimBits {
                joint: i,
                bits: raw_bits,
            });
        }
        let bits = ChannelBits::from_bits_truncate(raw_bits as u8);

        let first_component = reader.read_i32_le()?;
        if num_animated_components > 0
            && (first_component < 0
                || first_component as usize + bits.component_count() > num_animated_components)
        {
            return Err(AnimError::InvalidFirstComponent {
                joint: i,
                first_component,
            });
        }

        joints.push(JointAnimInfo {
            name_index,
            parent,
            bits,
            first_component: first_component.max(0) as usize,
        });
    }

    let base_count = reader.read_u32_le()? as usize;
    let mut base_frame = Vec::with_capacity(base_count);
    for _ in 0..base_count {
        let x = reader.read_f32_le()?;
        let y = reader.read_f32_le()?;
        let z = reader.read_f32_le()?;
        let w = reader.read_f32_le()?;
        let t = reader.read_f32x3_le()?;
        base_frame.push(JointPose {
            rotation: Quat::from_xyzw(x, y, z, w),
            translation: Vec3::from_array(t),
        });
    }

    let component_count = reader.read_u32_le()? as usize;
    if component_count != num_animated_components * num_frames {
        return Err(AnimError::InvalidArrayCount {
            field: "component frame count",
            count: component_count as i32,
        });
    }
    let mut component_frames = Vec::with_capacity(component_count);
    for _ in 0..component_count {
        component_frames.push(reader.read_f32_le()?);
    }
    // trailing pad float written by the exporter
    reader.read_f32_le()?;

    let total_delta = Vec3::from_array(reader.read_f32x3_le()?);

    // the root's position lives entirely in the per-frame deltas
    if let Some(root) = base_frame.first_mut() {
        root.translation = Vec3::ZERO;
    }

    Ok(Md5Anim {
        name,
        num_frames,
        frame_rate,
        anim_length_ms: anim_length as u32,
        num_animated_components,
        joints,
        bounds,
        base_frame,
        component_frames,
        total_delta,
    })
}

/// Write a clip's binary fast-path image
pub fn write<W: Write>(anim: &Md5Anim, names: &JointNameTable, writer: &mut W) -> Result<()> {
    writer.write_u32_le(BINARY_MAGIC)?;
    writer.write_u32_le(0)?;
    writer.write_u32_le(0)?;

    writer.write_i32_le(anim.num_frames as i32)?;
    writer.write_i32_le(anim.frame_rate as i32)?;
    writer.write_i32_le(anim.anim_length_ms as i32)?;
    writer.write_i32_le(anim.joints.len() as i32)?;
    writer.write_i32_le(anim.num_animated_components as i32)?;

    writer.write_u32_le(anim.bounds.len() as u32)?;
    for bounds in &anim.bounds {
        bounds.write(writer)?;
    }

    writer.write_u32_le(anim.joints.len() as u32)?;
    for info in &anim.joints {
        let joint_name = info
            .name_index
            .and_then(|index| names.resolve(index))
            .unwrap_or("");
        writer.write_string_le(joint_name)?;
        writer.write_i32_le(info.parent)?;
        writer.write_i32_le(i32::from(info.bits.bits()))?;
        writer.write_i32_le(info.first_component as i32)?;
    }

    writer.write_u32_le(anim.base_frame.len() as u32)?;
    for pose in &anim.base_frame {
        writer.write_f32_le(pose.rotation.x)?;
        writer.write_f32_le(pose.rotation.y)?;
        writer.write_f32_le(pose.rotation.z)?;
        writer.write_f32_le(pose.rotation.w)?;
        writer.write_f32x3_le(pose.translation.to_array())?;
    }

    writer.write_u32_le(anim.component_frames.len() as u32)?;
    for &value in &anim.component_frames {
        writer.write_f32_le(value)?;
    }
    writer.write_f32_le(0.0)?;

    writer.write_f32x3_le(anim.total_delta.to_array())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SOURCE: &str = r#"
MD5Version 10
commandline ""
numFrames 2
numJoints 2
frameRate 30
numAnimatedComponents 3
hierarchy {
	"origin" -1 3 0
	"pelvis" 0 8 2
}
bounds {
	( -4 -4 0 ) ( 4 4 70 )
	( -4 -4 0 ) ( 4 4 71 )
}
baseframe {
	( 1 2 0 ) ( 0 0 0 )
	( 0 0 44 ) ( 0.1 0 0 )
}
frame 0 {
	1 2 0.1
}
frame 1 {
	4 6 0.2
}
"#;

    fn load_source() -> (Md5Anim, JointNameTable) {
        let mut names = JointNameTable::new();
        let anim = Md5Anim::parse_text("run.md5anim", SOURCE, &mut names).unwrap();
        (anim, names)
    }

    #[test]
    fn test_sniff() {
        let mut data = Vec::new();
        data.write_u32_le(BINARY_MAGIC).unwrap();
        assert!(sniff(&data));
        assert!(!sniff(&data[..3]));
        assert!(!sniff(b"MD5Version 10"));
    }

    #[test]
    fn test_magic_mismatch() {
        let mut data = Vec::new();
        data.write_u32_le(0xDEAD_BEEF).unwrap();
        let mut names = JointNameTable::new();
        let result = parse(&mut Cursor::new(data), "x.md5anim".to_string(), &mut names);
        assert!(matches!(result, Err(AnimError::InvalidMagic { .. })));
    }

    #[test]
    fn test_round_trip_is_bit_identical() {
        let (anim, mut names) = load_source();

        let mut data = Vec::new();
        write(&anim, &names, &mut data).unwrap();

        let reloaded = parse(
            &mut Cursor::new(data),
            "run.md5anim".to_string(),
            &mut names,
        )
        .unwrap();

        assert_eq!(reloaded, anim);
    }

    #[test]
    fn test_component_array_has_trailing_pad() {
        let (anim, names) = load_source();

        let mut data = Vec::new();
        write(&anim, &names, &mut data).unwrap();

        // magic + reserved (12) + header ints (20)
        // + bounds (4 + 2 * 24) + joints (4 + 2 * (4 + name + 12))
        // + baseframe (4 + 2 * 28) + components (4 + (6 + 1) * 4)
        // + total delta (12)
        let joints_bytes = 4 + (4 + 6 + 12) + (4 + 6 + 12);
        let expected = 12 + 20 + (4 + 48) + (4 + joints_bytes) + (4 + 56) + (4 + 28) + 12;
        assert_eq!(data.len(), expected);
    }

    #[test]
    fn test_truncated_file_fails_cleanly() {
        let (anim, mut names) = load_source();

        let mut data = Vec::new();
        write(&anim, &names, &mut data).unwrap();
        data.truncate(data.len() / 2);

        let result = parse(
            &mut Cursor::new(data),
            "run.md5anim".to_string(),
            &mut names,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_component_count_mismatch_rejected() {
        let (anim, mut names) = load_source();
        let mut broken = anim.clone();
        broken.component_frames.pop();

        let mut data = Vec::new();
        write(&broken, &names, &mut data).unwrap();

        let result = parse(
            &mut Cursor::new(data),
            "run.md5anim".to_string(),
            &mut names,
        );
        assert!(matches!(
            result,
            Err(AnimError::InvalidArrayCount {
                field: "component frame count",
                ..
            })
        ));
    }
}
