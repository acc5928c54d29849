//! Accumulation of voxel crossings into dense grids.
//!
//! [`voxelize`] is the entry point: it clips a [`SegmentBatch`](crate::shape::SegmentBatch)
//! to the grid, optionally merges duplicate segments, traverses them, and accumulates the
//! crossings according to the requested [`WallMode`]. The building blocks are exported
//! individually as well.

pub use self::accumulate::{accumulate, GridOutput, GridRequest};
pub use self::combine::{combine_segments, pack_voxel_pair, CombinedSegment};
pub use self::decay_fill::decay_fill;
pub use self::dense_grid::{ChannelGrid, DenseGrid};
pub use self::truth::{rasterize_truth, TruthGrid};
pub use self::voxel_paths::{
    VoxelPathMetadata, VoxelPathRow, VoxelPathTable, DEFAULT_PATH_BATCH_LEN,
};
pub use self::voxelize::{
    voxelize, voxelize_time_bins, Voxelization, VoxelizationOptions, WallMode,
};
pub use self::walls::{
    fold_outputs, fold_walls, fold_walls_keep_walls, partition_by_wall, stack_walls,
    touching_walls, WallOutput, WallStack,
};

mod accumulate;
mod combine;
mod decay_fill;
mod dense_grid;
mod truth;
mod voxel_paths;
mod voxelize;
mod walls;
