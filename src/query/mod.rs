//! Non-persistent geometric queries: slab clipping and voxel traversal.
//!
//! * [`clip_rays`] extends every `(start, direction)` half-line until it leaves the grid.
//! * [`traverse_segment`] enumerates, in order, the voxels crossed by one finite segment.
//! * [`voxel_crossings`] does the same for a whole batch of segments.
//!
//! The lower-level slab clipping of lines, rays and finite segments against an
//! [`Aabb`](crate::bounding_volume::Aabb) is exported by the [`details`] submodule.

pub use self::clip::{clip_ray, clip_rays};
pub use self::traversal::{segment_crossings, traverse_segment, voxel_crossings, VoxelCrossing};

mod clip;
mod traversal;

/// Lower-level clipping functions.
pub mod details {
    pub use super::clip::clip_aabb_line;
}
