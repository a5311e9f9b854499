//! The animation clip: parsed MD5 animation data and its sampling
//! operations.
//!
//! A clip is populated once by a load and treated as an immutable
//! snapshot afterwards. Loading accepts both the declarative text format
//! and the binary fast-path; the binary file is a cache of the parsed
//! result, never an independent source of truth.

use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use glam::{Quat, Vec3};
use md5_data::Lexer;

use crate::binary;
use crate::codec;
use crate::error::{AnimError, Result};
use crate::name_table::JointNameTable;
use crate::timeline::{FrameBlend, FrameTimeline};
use crate::types::{Bounds, ChannelBits, JointAnimInfo, JointPose, ModelJoint};

/// Text format version handled by this parser
pub const MD5_VERSION: i32 = 10;
/// Keyword opening every text animation file
pub const MD5_VERSION_STRING: &str = "MD5Version";
/// File extension for animation files
pub const MD5_ANIM_EXT: &str = "md5anim";

/// A loaded MD5 animation
#[derive(Debug, Clone, PartialEq)]
pub struct Md5Anim {
    pub(crate) name: String,
    pub(crate) num_frames: usize,
    pub(crate) frame_rate: u32,
    pub(crate) anim_length_ms: u32,
    pub(crate) num_animated_components: usize,
    pub(crate) joints: Vec<JointAnimInfo>,
    pub(crate) bounds: Vec<Bounds>,
    pub(crate) base_frame: Vec<JointPose>,
    pub(crate) component_frames: Vec<f32>,
    pub(crate) total_delta: Vec3,
}

impl Default for Md5Anim {
    fn default() -> Self {
        Self {
            name: String::new(),
            num_frames: 0,
            frame_rate: 24,
            anim_length_ms: 0,
            num_animated_components: 0,
            joints: Vec::new(),
            bounds: Vec::new(),
            base_frame: Vec::new(),
            component_frames: Vec::new(),
            total_delta: Vec3::ZERO,
        }
    }
}

impl Md5Anim {
    /// Load an animation from a file, preferring the binary fast-path.
    ///
    /// The file is sniffed for the binary magic; anything else is parsed
    /// as the text format. Joint names resolve through `names`.
    pub fn load<P: AsRef<Path>>(path: P, names: &mut JointNameTable) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path.to_string_lossy().into_owned();

        if binary::sniff(&data) {
            binary::parse(&mut Cursor::new(&data), name, names)
        } else {
            let source = std::str::from_utf8(&data)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            Self::parse_text(&name, source, names)
        }
    }

    /// Reset the clip and re-load it from its remembered file name.
    /// The name is kept even when the load fails, so a later reload can
    /// retry.
    pub fn reload(&mut self, names: &mut JointNameTable) -> Result<()> {
        let name = std::mem::take(&mut self.name);
        *self = Self::default();
        match Self::load(&name, names) {
            Ok(anim) => {
                *self = anim;
                Ok(())
            }
            Err(err) => {
                self.name = name;
                Err(err)
            }
        }
    }

    /// Parse the text format from a complete source string
    pub fn parse_text(name: &str, source: &str, names: &mut JointNameTable) -> Result<Self> {
        let mut lexer = Lexer::new(source);

        lexer.expect_token(MD5_VERSION_STRING)?;
        let version = lexer.parse_int()?;
        if version != MD5_VERSION {
            return Err(AnimError::UnsupportedVersion {
                expected: MD5_VERSION,
                found: version,
            });
        }

        // skip the commandline
        lexer.expect_token("commandline")?;
        lexer.read_token()?;

        lexer.expect_token("numFrames")?;
        let num_frames = lexer.parse_int()?;
        if num_frames <= 0 {
            return Err(AnimError::InvalidFrameCount(num_frames));
        }
        let num_frames = num_frames as usize;

        lexer.expect_token("numJoints")?;
        let num_joints = lexer.parse_int()?;
        if num_joints <= 0 {
            return Err(AnimError::InvalidJointCount(num_joints));
        }
        let num_joints = num_joints as usize;

        lexer.expect_token("frameRate")?;
        let frame_rate = lexer.parse_int()?;
        if frame_rate < 0 {
            return Err(AnimError::InvalidFrameRate(frame_rate));
        }
        let frame_rate = frame_rate as u32;

        lexer.expect_token("numAnimatedComponents")?;
        let num_animated_components = lexer.parse_int()?;
        if num_animated_components < 0 || num_animated_components as usize > num_joints * 6 {
            return Err(AnimError::InvalidComponentCount(num_animated_components));
        }
        let num_animated_components = num_animated_components as usize;

        // hierarchy
        let mut joints = Vec::with_capacity(num_joints);
        lexer.expect_token("hierarchy")?;
        lexer.expect_token("{")?;
        for i in 0..num_joints {
            let joint_name = lexer.read_token()?;
            let name_index = Some(names.intern(joint_name.text));

            let parent = lexer.parse_int()?;
            if parent >= i as i32 {
                return Err(AnimError::InvalidParent { joint: i, parent });
            }
            if i != 0 && parent < 0 {
                return Err(AnimError::MultipleRoots(i));
            }

            let raw_bits = lexer.parse_int()?;
            if raw_bits & !0x3F != 0 {
                return Err(AnimError::InvalidAnimBits {
                    joint: i,
                    bits: raw_bits,
                });
            }
            let bits = ChannelBits::from_bits_truncate(raw_bits as u8);

            let first_component = lexer.parse_int()?;
            if num_animated_components > 0
                && (first_component < 0
                    || first_component as usize + bits.component_count()
                        > num_animated_components)
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
        lexer.expect_token("}")?;

        // bounds, one box per frame
        let mut bounds = Vec::with_capacity(num_frames);
        lexer.expect_token("bounds")?;
        lexer.expect_token("{")?;
        for _ in 0..num_frames {
            let mut min = [0.0f32; 3];
            let mut max = [0.0f32; 3];
            lexer.parse_float_array(&mut min)?;
            lexer.parse_float_array(&mut max)?;
            bounds.push(Bounds {
                min: Vec3::from_array(min),
                max: Vec3::from_array(max),
            });
        }
        lexer.expect_token("}")?;

        // baseframe, rotation stored as xyz with w derived
        let mut base_frame = Vec::with_capacity(num_joints);
        lexer.expect_token("baseframe")?;
        lexer.expect_token("{")?;
        for _ in 0..num_joints {
            let mut t = [0.0f32; 3];
            let mut q = [0.0f32; 3];
            lexer.parse_float_array(&mut t)?;
            lexer.parse_float_array(&mut q)?;
            base_frame.push(JointPose {
                rotation: Quat::from_xyzw(
                    q[0],
                    q[1],
                    q[2],
                    codec::restore_quat_w(q[0], q[1], q[2]),
                ),
                translation: Vec3::from_array(t),
            });
        }
        lexer.expect_token("}")?;

        // frames
        let mut component_frames = Vec::with_capacity(num_animated_components * num_frames);
        for i in 0..num_frames {
            lexer.expect_token("frame")?;
            let num = lexer.parse_int()?;
            if num != i as i32 {
                return Err(AnimError::FrameOutOfSequence {
                    expected: i,
                    found: num,
                });
            }
            lexer.expect_token("{")?;
            for _ in 0..num_animated_components {
                component_frames.push(lexer.parse_float()?);
            }
            lexer.expect_token("}")?;
        }

        let mut anim = Self {
            name: name.to_string(),
            num_frames,
            frame_rate,
            anim_length_ms: 0,
            num_animated_components,
            joints,
            bounds,
            base_frame,
            component_frames,
            total_delta: Vec3::ZERO,
        };
        anim.extract_root_motion();

        // the last frame is not counted; dwelling on it would pause every
        // loop for one frame
        anim.anim_length_ms = if frame_rate == 0 {
            0
        } else {
            ((num_frames as u32 - 1) * 1000 + frame_rate - 1) / frame_rate
        };

        Ok(anim)
    }

    /// Convert the root joint's stored absolute translations into
    /// baseframe-relative deltas, record the closed-loop movement of the
    /// whole clip, and zero the root's baseframe translation (the root's
    /// position is carried entirely by the per-frame deltas afterwards).
    fn extract_root_motion(&mut self) {
        if self.num_animated_components > 0 {
            let root = &self.joints[0];
            let bits = root.bits;
            let base_t = self.base_frame[0].translation;
            let stride = self.num_animated_components;
            let last = self.num_frames - 1;
            let mut at = root.first_component;
            let mut delta = Vec3::ZERO;

            if bits.contains(ChannelBits::TX) {
                for f in 0..self.num_frames {
                    self.component_frames[f * stride + at] -= base_t.x;
                }
                delta.x = self.component_frames[last * stride + at];
                at += 1;
            }
            if bits.contains(ChannelBits::TY) {
                for f in 0..self.num_frames {
                    self.component_frames[f * stride + at] -= base_t.y;
                }
                delta.y = self.component_frames[last * stride + at];
                at += 1;
            }
            if bits.contains(ChannelBits::TZ) {
                for f in 0..self.num_frames {
                    self.component_frames[f * stride + at] -= base_t.z;
                }
                delta.z = self.component_frames[last * stride + at];
            }
            self.total_delta = delta;
        } else {
            self.total_delta = Vec3::ZERO;
        }

        if let Some(root) = self.base_frame.first_mut() {
            root.translation = Vec3::ZERO;
        }
    }

    /// Identity this clip was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of frames (> 0 once loaded)
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Number of joints (> 0 once loaded)
    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    /// Playback rate in frames per second
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Duration of one playback cycle in milliseconds
    pub fn length_ms(&self) -> u32 {
        self.anim_length_ms
    }

    /// Floats stored per frame across all joints
    pub fn num_animated_components(&self) -> usize {
        self.num_animated_components
    }

    /// Net root translation across one full playback cycle
    pub fn total_delta(&self) -> Vec3 {
        self.total_delta
    }

    /// Per-joint animation metadata
    pub fn joints(&self) -> &[JointAnimInfo] {
        &self.joints
    }

    /// Reference pose, one entry per joint
    pub fn base_frame(&self) -> &[JointPose] {
        &self.base_frame
    }

    /// Playback policy for this clip's frame count and rate
    pub fn timeline(&self) -> FrameTimeline {
        FrameTimeline::new(self.num_frames, self.frame_rate)
    }

    /// Serialize the binary fast-path representation. Joint names are
    /// written out through `names` so a reader can re-intern them.
    pub fn write_binary<W: std::io::Write>(
        &self,
        names: &JointNameTable,
        writer: &mut W,
    ) -> Result<()> {
        binary::write(self, names, writer)
    }

    fn frame_row(&self, frame: usize) -> &[f32] {
        let frame = frame.min(self.num_frames.saturating_sub(1));
        let start = frame * self.num_animated_components;
        &self.component_frames[start..start + self.num_animated_components]
    }

    fn joint_window<'a>(row: &'a [f32], info: &JointAnimInfo) -> &'a [f32] {
        &row[info.first_component..info.first_component + info.bits.component_count()]
    }

    /// Sample a blended pose for the requested joints.
    ///
    /// `joints` must hold one entry per clip joint; every entry is first
    /// reset to the baseframe, then the joints listed in `index` get
    /// their animated channels decoded at both frames and blended by
    /// `frame.back_weight`. When cycling, the accumulated per-cycle root
    /// movement lands on joint 0.
    pub fn get_interpolated_frame(
        &self,
        frame: &FrameBlend,
        joints: &mut [JointPose],
        index: &[usize],
    ) {
        for (dst, src) in joints.iter_mut().zip(&self.base_frame) {
            *dst = *src;
        }

        if self.num_animated_components == 0 {
            return;
        }

        let row1 = self.frame_row(frame.frame1);
        let row2 = self.frame_row(frame.frame2);

        for &j in index {
            let (Some(info), Some(base)) = (self.joints.get(j), self.base_frame.get(j)) else {
                continue;
            };
            if info.bits.is_empty() {
                continue;
            }
            let Some(dst) = joints.get_mut(j) else {
                continue;
            };

            let pose1 = codec::decode_pose(info.bits, base, Self::joint_window(row1, info));
            let pose2 = codec::decode_pose(info.bits, base, Self::joint_window(row2, info));
            dst.translation = pose1
                .translation
                .lerp(pose2.translation, frame.back_weight);
            dst.rotation = pose1.rotation.slerp(pose2.rotation, frame.back_weight);
        }

        if frame.cycle_count != 0 {
            if let Some(root) = joints.get_mut(0) {
                root.translation += self.total_delta * frame.cycle_count as f32;
            }
        }
    }

    /// Sample a single frame for the requested joints, no blending.
    /// Frame 0 is definitionally the baseframe.
    pub fn get_single_frame(&self, frame_num: usize, joints: &mut [JointPose], index: &[usize]) {
        for (dst, src) in joints.iter_mut().zip(&self.base_frame) {
            *dst = *src;
        }

        if frame_num == 0 || self.num_animated_components == 0 {
            return;
        }

        let row = self.frame_row(frame_num);
        for &j in index {
            let (Some(info), Some(base)) = (self.joints.get(j), self.base_frame.get(j)) else {
                continue;
            };
            if info.bits.is_empty() {
                continue;
            }
            let Some(dst) = joints.get_mut(j) else {
                continue;
            };
            *dst = codec::decode_pose(info.bits, base, Self::joint_window(row, info));
        }
    }

    /// Interpolated root translation at `frame`, without cycle movement
    fn root_offset(&self, frame: &FrameBlend) -> Vec3 {
        let mut offset = self
            .base_frame
            .first()
            .map_or(Vec3::ZERO, |p| p.translation);

        let Some(root) = self.joints.first() else {
            return offset;
        };
        if self.num_animated_components == 0 || !root.bits.intersects(ChannelBits::TRANSLATION) {
            return offset;
        }

        let w1 = Self::joint_window(self.frame_row(frame.frame1), root);
        let w2 = Self::joint_window(self.frame_row(frame.frame2), root);
        let t1 = codec::decode_translation(root.bits, offset, w1);
        let t2 = codec::decode_translation(root.bits, offset, w2);
        offset = t1.lerp(t2, frame.back_weight);
        offset
    }

    /// Root translation at a point in time, including the accumulated
    /// per-cycle movement delta
    pub fn get_origin(&self, time_ms: i32, max_cycles: i32) -> Vec3 {
        let frame = self.timeline().convert(time_ms, max_cycles);
        let mut offset = self.root_offset(&frame);
        if frame.cycle_count != 0 {
            offset += self.total_delta * frame.cycle_count as f32;
        }
        offset
    }

    /// Root rotation at a point in time
    pub fn get_origin_rotation(&self, time_ms: i32, max_cycles: i32) -> Quat {
        let base_q = self
            .base_frame
            .first()
            .map_or(Quat::IDENTITY, |p| p.rotation);

        let Some(root) = self.joints.first() else {
            return base_q;
        };
        if self.num_animated_components == 0 || !root.bits.intersects(ChannelBits::ROTATION) {
            return base_q;
        }

        let frame = self.timeline().convert(time_ms, max_cycles);
        let w1 = Self::joint_window(self.frame_row(frame.frame1), root);
        let w2 = Self::joint_window(self.frame_row(frame.frame2), root);
        let q1 = codec::decode_rotation(root.bits, base_q, w1);
        let q2 = codec::decode_rotation(root.bits, base_q, w2);
        q1.slerp(q2, frame.back_weight)
    }

    /// Model-space bounds at a point in time: the union of the two
    /// sampled frames' boxes, shifted back by the interpolated root
    /// offset
    pub fn get_bounds(&self, time_ms: i32, max_cycles: i32) -> Bounds {
        let zero = Bounds {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        };
        if self.bounds.is_empty() {
            return zero;
        }

        let frame = self.timeline().convert(time_ms, max_cycles);
        let last = self.bounds.len() - 1;
        let b1 = self.bounds[frame.frame1.min(last)];
        let b2 = self.bounds[frame.frame2.min(last)];
        b1.union(b2).translated_back(self.root_offset(&frame))
    }

    /// Fail loudly if this animation's joint topology disagrees with a
    /// model's. A clip that loaded fine in isolation can still be bound
    /// to the wrong skeleton; this is the bind-time guard.
    pub fn check_model_hierarchy(
        &self,
        model_name: &str,
        model_joints: &[ModelJoint],
        names: &JointNameTable,
    ) -> Result<()> {
        if self.joints.len() != model_joints.len() {
            return Err(AnimError::JointCountMismatch {
                model: model_name.to_string(),
                anim: self.name.clone(),
            });
        }

        for (info, model_joint) in self.joints.iter().zip(model_joints) {
            let anim_name = info.name_index.and_then(|index| names.resolve(index));
            if anim_name != Some(model_joint.name.as_str()) {
                return Err(AnimError::JointNameMismatch {
                    model: model_name.to_string(),
                    anim: self.name.clone(),
                });
            }
            if info.parent != model_joint.parent {
                return Err(AnimError::HierarchyMismatch {
                    model: model_name.to_string(),
                    anim: self.name.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Three joints: a root translating along z, a body rotating around x,
    // and a static head.
    const WALK_SOURCE: &str = r#"
MD5Version 10
commandline "anim maps/walk.mb -dest walk"

numFrames 3
numJoints 3
frameRate 24
numAnimatedComponents 2

hierarchy {
	"origin"	-1 4 0	// root, tz only
	"body"	0 8 1	// qx
	"head"	1 0 0
}

bounds {
	( -8 -8 0 ) ( 8 8 70 )
	( -8 -8 4 ) ( 8 8 72 )
	( -8 -8 9 ) ( 8 8 74 )
}

baseframe {
	( 0 0 0 ) ( 0 0 0 )
	( 0 0 40 ) ( 0.2 0 0 )
	( 0 0 24 ) ( 0 0 0 )
}

frame 0 {
	 0 0.2
}

frame 1 {
	 5 0.3
}

frame 2 {
	 10 0.4
}
"#;

    fn parse_walk(names: &mut JointNameTable) -> Md5Anim {
        Md5Anim::parse_text("walk.md5anim", WALK_SOURCE, names).unwrap()
    }

    #[test]
    fn test_parse_header_fields() {
        let mut names = JointNameTable::new();
        let anim = parse_walk(&mut names);

        assert_eq!(anim.num_frames(), 3);
        assert_eq!(anim.num_joints(), 3);
        assert_eq!(anim.frame_rate(), 24);
        assert_eq!(anim.num_animated_components(), 2);
        // ceil(2 * 1000 / 24)
        assert_eq!(anim.length_ms(), 84);
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_root_motion_extraction() {
        let mut names = JointNameTable::new();
        let anim = parse_walk(&mut names);

        assert_eq!(anim.total_delta(), Vec3::new(0.0, 0.0, 10.0));
        // baseframe z was already 0, so stored values are unchanged
        assert_eq!(anim.component_frames[0], 0.0);
        assert_eq!(anim.component_frames[2], 5.0);
        assert_eq!(anim.component_frames[4], 10.0);
        // root baseframe translation zeroed after extraction
        assert_eq!(anim.base_frame()[0].translation, Vec3::ZERO);
    }

    #[test]
    fn test_root_motion_subtracts_nonzero_baseframe() {
        let source = WALK_SOURCE.replace("( 0 0 0 ) ( 0 0 0 )", "( 0 0 2 ) ( 0 0 0 )");
        let mut names = JointNameTable::new();
        let anim = Md5Anim::parse_text("walk.md5anim", &source, &mut names).unwrap();

        // absolute [0, 5, 10] minus baseframe z=2 -> relative [-2, 3, 8]
        assert_eq!(anim.component_frames[0], -2.0);
        assert_eq!(anim.component_frames[2], 3.0);
        assert_eq!(anim.component_frames[4], 8.0);
        assert_eq!(anim.total_delta(), Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(anim.base_frame()[0].translation, Vec3::ZERO);
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let source = WALK_SOURCE.replace("MD5Version 10", "MD5Version 6");
        let mut names = JointNameTable::new();
        assert!(matches!(
            Md5Anim::parse_text("bad.md5anim", &source, &mut names),
            Err(AnimError::UnsupportedVersion {
                expected: 10,
                found: 6
            })
        ));
    }

    #[test]
    fn test_forward_parent_rejected() {
        let source = WALK_SOURCE.replace("\"body\"\t0 8 1", "\"body\"\t2 8 1");
        let mut names = JointNameTable::new();
        assert!(matches!(
            Md5Anim::parse_text("bad.md5anim", &source, &mut names),
            Err(AnimError::InvalidParent {
                joint: 1,
                parent: 2
            })
        ));
    }

    #[test]
    fn test_second_root_rejected() {
        let source = WALK_SOURCE.replace("\"body\"\t0 8 1", "\"body\"\t-1 8 1");
        let mut names = JointNameTable::new();
        assert!(matches!(
            Md5Anim::parse_text("bad.md5anim", &source, &mut names),
            Err(AnimError::MultipleRoots(1))
        ));
    }

    #[test]
    fn test_wide_anim_bits_rejected() {
        let source = WALK_SOURCE.replace("\"body\"\t0 8 1", "\"body\"\t0 64 1");
        let mut names = JointNameTable::new();
        assert!(matches!(
            Md5Anim::parse_text("bad.md5anim", &source, &mut names),
            Err(AnimError::InvalidAnimBits { joint: 1, bits: 64 })
        ));
    }

    #[test]
    fn test_component_window_outside_buffer_rejected() {
        let source = WALK_SOURCE.replace("\"body\"\t0 8 1", "\"body\"\t0 8 3");
        let mut names = JointNameTable::new();
        assert!(matches!(
            Md5Anim::parse_text("bad.md5anim", &source, &mut names),
            Err(AnimError::InvalidFirstComponent { joint: 1, .. })
        ));
    }

    #[test]
    fn test_frame_out_of_sequence_rejected() {
        let source = WALK_SOURCE.replace("frame 1 {", "frame 2 {");
        let mut names = JointNameTable::new();
        assert!(matches!(
            Md5Anim::parse_text("bad.md5anim", &source, &mut names),
            Err(AnimError::FrameOutOfSequence {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_component_count_out_of_range_rejected() {
        let source = WALK_SOURCE.replace("numAnimatedComponents 2", "numAnimatedComponents 19");
        let mut names = JointNameTable::new();
        assert!(matches!(
            Md5Anim::parse_text("bad.md5anim", &source, &mut names),
            Err(AnimError::InvalidComponentCount(19))
        ));
    }

    #[test]
    fn test_single_frame_zero_is_baseframe() {
        let mut names = JointNameTable::new();
        let anim = parse_walk(&mut names);

        let mut pose = vec![JointPose::default(); anim.num_joints()];
        anim.get_single_frame(0, &mut pose, &[0, 1, 2]);
        assert_eq!(pose, anim.base_frame());
    }

    #[test]
    fn test_single_frame_decodes_components() {
        let mut names = JointNameTable::new();
        let anim = parse_walk(&mut names);

        let mut pose = vec![JointPose::default(); anim.num_joints()];
        anim.get_single_frame(2, &mut pose, &[0, 1, 2]);

        assert_eq!(pose[0].translation.z, 10.0);
        assert!((pose[1].rotation.x - 0.4).abs() < 1e-6);
        // unrequested channels and joints keep the baseframe
        assert_eq!(pose[2], anim.base_frame()[2]);
    }

    #[test]
    fn test_unrequested_joints_stay_on_baseframe() {
        let mut names = JointNameTable::new();
        let anim = parse_walk(&mut names);

        let mut pose = vec![JointPose::default(); anim.num_joints()];
        anim.get_single_frame(2, &mut pose, &[1]);

        assert_eq!(pose[0], anim.base_frame()[0]);
        assert!((pose[1].rotation.x - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_interpolated_frame_blends_translation() {
        let mut names = JointNameTable::new();
        let anim = parse_walk(&mut names);

        let frame = FrameBlend {
            frame1: 0,
            frame2: 1,
            front_weight: 0.75,
            back_weight: 0.25,
            cycle_count: 0,
        };
        let mut pose = vec![JointPose::default(); anim.num_joints()];
        anim.get_interpolated_frame(&frame, &mut pose, &[0, 1, 2]);

        assert!((pose[0].translation.z - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_cycle_delta_lands_on_root() {
        let mut names = JointNameTable::new();
        let anim = parse_walk(&mut names);

        let frame = FrameBlend {
            frame1: 0,
            frame2: 1,
            front_weight: 1.0,
            back_weight: 0.0,
            cycle_count: 2,
        };
        let mut pose = vec![JointPose::default(); anim.num_joints()];
        anim.get_interpolated_frame(&frame, &mut pose, &[0]);

        assert_eq!(pose[0].translation.z, 20.0);
    }

    #[test]
    fn test_get_origin_tracks_root() {
        let mut names = JointNameTable::new();
        let anim = parse_walk(&mut names);

        assert_eq!(anim.get_origin(0, 0), Vec3::ZERO);
        // halfway between frame 1 (z=5) and frame 2 (z=10): 24 fps makes
        // 62.5 ms land at frame 1.5
        let origin = anim.get_origin(63, 0);
        assert!((origin.z - 5.0 * 1.512).abs() < 0.2);
    }

    #[test]
    fn test_get_bounds_unions_and_offsets() {
        let mut names = JointNameTable::new();
        let anim = parse_walk(&mut names);

        let bounds = anim.get_bounds(0, 0);
        // union of frames 0 and 1, shifted back by the root offset (0)
        assert_eq!(bounds.min, Vec3::new(-8.0, -8.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(8.0, 8.0, 72.0));
    }

    #[test]
    fn test_check_model_hierarchy() {
        let mut names = JointNameTable::new();
        let anim = parse_walk(&mut names);

        let mut model = vec![
            ModelJoint {
                name: "origin".to_string(),
                parent: -1,
            },
            ModelJoint {
                name: "body".to_string(),
                parent: 0,
            },
            ModelJoint {
                name: "head".to_string(),
                parent: 1,
            },
        ];
        assert!(anim.check_model_hierarchy("imp", &model, &names).is_ok());

        model[2].parent = 0;
        assert!(matches!(
            anim.check_model_hierarchy("imp", &model, &names),
            Err(AnimError::HierarchyMismatch { .. })
        ));

        model[2].parent = 1;
        model[1].name = "chest".to_string();
        assert!(matches!(
            anim.check_model_hierarchy("imp", &model, &names),
            Err(AnimError::JointNameMismatch { .. })
        ));

        model.pop();
        assert!(matches!(
            anim.check_model_hierarchy("imp", &model, &names),
            Err(AnimError::JointCountMismatch { .. })
        ));
    }
}
