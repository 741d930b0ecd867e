//! Charts and images built from listening data.

pub mod collage;
pub mod timeline;

pub use collage::{GridSize, create_collage, save_collage};
pub use timeline::timeline_url;
