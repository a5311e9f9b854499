// Re-export main components
pub mod binary;
pub mod cache;
pub mod clip;
pub mod codec;
pub mod error;
pub mod name_table;
pub mod timeline;
pub mod types;

// Re-export common types
pub use cache::{AnimCache, AnimHandle};
pub use clip::{MD5_ANIM_EXT, MD5_VERSION, MD5_VERSION_STRING, Md5Anim};
pub use error::{AnimError, Result};
pub use name_table::JointNameTable;
pub use timeline::{FrameBlend, FrameTimeline};
pub use types::{Bounds, ChannelBits, JointAnimInfo, JointPose, ModelJoint};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
