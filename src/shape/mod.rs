//! Shapes supported by voxtrace: the voxel grid, segments and detector walls.

pub use self::grid_error::GridError;
pub use self::segment::{Segment, SegmentBatch, WeightDomain};
pub(crate) use self::segment::check_len;
pub use self::voxel_grid::VoxelGrid;
pub use self::wall::{Wall, WallMask};

mod grid_error;
mod segment;
mod voxel_grid;
mod wall;
