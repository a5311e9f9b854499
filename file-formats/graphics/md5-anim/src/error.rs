//! Error handling for MD5 animation parsing and sampling

use std::io;

use md5_data::Md5DataError;
use thiserror::Error;

/// Errors that can occur when working with MD5 animation files
#[derive(Debug, Error)]
pub enum AnimError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The text tokenizer rejected the input
    #[error("lex error: {0}")]
    Lex(#[from] Md5DataError),

    /// Invalid magic number in a binary animation file
    #[error("invalid magic number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic {
        /// The expected magic value
        expected: u32,
        /// The actual magic value found
        found: u32,
    },

    /// Unsupported text format version
    #[error("invalid version {found}, should be version {expected}")]
    UnsupportedVersion {
        /// The version this parser handles
        expected: i32,
        /// The version declared by the file
        found: i32,
    },

    /// Frame count must be positive
    #[error("invalid number of frames: {0}")]
    InvalidFrameCount(i32),

    /// Joint count must be positive
    #[error("invalid number of joints: {0}")]
    InvalidJointCount(i32),

    /// Frame rate must not be negative
    #[error("invalid frame rate: {0}")]
    InvalidFrameRate(i32),

    /// Animated component count outside `0..=6 * joint count`
    #[error("invalid number of animated components: {0}")]
    InvalidComponentCount(i32),

    /// A joint's parent index must be less than its own index
    #[error("invalid parent num {parent} for joint {joint}")]
    InvalidParent {
        /// Index of the joint carrying the bad parent
        joint: usize,
        /// The offending parent index
        parent: i32,
    },

    /// Only joint 0 may be parentless
    #[error("animations may have only one root joint (joint {0})")]
    MultipleRoots(usize),

    /// A joint's animated-channel mask has bits outside the low six
    #[error("invalid anim bits {bits:#x} for joint {joint}")]
    InvalidAnimBits {
        /// Index of the joint carrying the bad mask
        joint: usize,
        /// The offending raw mask
        bits: i32,
    },

    /// A joint's component window falls outside the per-frame buffer
    #[error("invalid first component {first_component} for joint {joint}")]
    InvalidFirstComponent {
        /// Index of the joint carrying the bad offset
        joint: usize,
        /// The offending offset
        first_component: i32,
    },

    /// Frame blocks must appear in order 0, 1, 2, ..
    #[error("expected frame number {expected}, found {found}")]
    FrameOutOfSequence {
        /// The frame number required here
        expected: usize,
        /// The frame number the file declared
        found: i32,
    },

    /// A counted field in a binary file declares an impossible value
    #[error("invalid {field}: {count}")]
    InvalidArrayCount {
        /// Which field carried the bad value
        field: &'static str,
        /// The offending value
        count: i32,
    },

    /// Animation and model disagree on joint count (bind-time check)
    #[error("model '{model}' has different # of joints than anim '{anim}'")]
    JointCountMismatch {
        /// Model identity
        model: String,
        /// Animation identity
        anim: String,
    },

    /// Animation and model disagree on a joint name (bind-time check)
    #[error("model '{model}'s joint names don't match anim '{anim}'s")]
    JointNameMismatch {
        /// Model identity
        model: String,
        /// Animation identity
        anim: String,
    },

    /// Animation and model disagree on the parent topology (bind-time check)
    #[error("model '{model}' has different joint hierarchy than anim '{anim}'")]
    HierarchyMismatch {
        /// Model identity
        model: String,
        /// Animation identity
        anim: String,
    },
}

/// Type alias for Results from MD5 animation operations
pub type Result<T> = std::result::Result<T, AnimError>;
