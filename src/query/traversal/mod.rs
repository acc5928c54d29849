//! Exact voxel traversal of finite segments.

pub use self::traverse_segment::{segment_crossings, traverse_segment};
pub use self::voxel_crossing::VoxelCrossing;
pub use self::voxel_crossings::voxel_crossings;

mod traverse_segment;
mod voxel_crossing;
mod voxel_crossings;
