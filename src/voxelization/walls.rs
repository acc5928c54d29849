//! Per-wall partitioning and recombination of accumulation grids.

use crate::shape::{Wall, WallMask};
use crate::voxelization::{ChannelGrid, DenseGrid, GridOutput};

/// The accumulation of the segments recorded on one detector wall.
#[derive(Clone, Debug, PartialEq)]
pub struct WallOutput {
    /// The wall these segments were recorded on.
    pub wall: Wall,
    /// The batch index of every segment of this wall.
    ///
    /// Per-segment grids of `output` follow the same order.
    pub indices: Vec<usize>,
    /// The grids accumulated from this wall's segments only.
    pub output: GridOutput,
}

/// The per-wall grids stacked along a trailing channel axis.
#[derive(Clone, Debug, PartialEq)]
pub struct WallStack {
    /// The `(nx, ny, nz, 6)` grid whose channel `w` is the cumulative grid of wall `w`.
    pub stacked: ChannelGrid,
    /// The accumulation of every wall with at least one segment, in wall order.
    pub walls: Vec<WallOutput>,
}

/// Buckets the positions `0..walls.len()` by wall.
///
/// The `w`-th bucket lists, in increasing order, the positions labeled with the wall of
/// index `w`.
pub fn partition_by_wall(walls: &[Wall]) -> [Vec<usize>; Wall::COUNT] {
    let mut buckets: [Vec<usize>; Wall::COUNT] = Default::default();

    for (i, wall) in walls.iter().enumerate() {
        buckets[wall.index()].push(i);
    }

    for (wall, bucket) in Wall::ALL.iter().zip(buckets.iter()) {
        log::trace!("wall {}: {} segments", wall, bucket.len());
    }

    buckets
}

/// Stacks the cumulative grid of every wall into a 6-channel grid.
///
/// Channels of walls without output are zero.
pub fn stack_walls(shape: [u32; 3], outputs: &[WallOutput]) -> ChannelGrid {
    let mut stacked = ChannelGrid::zeros(shape, Wall::COUNT);

    for wall_output in outputs {
        stacked.set_channel(wall_output.wall.index(), &wall_output.output.cumulative);
    }

    stacked
}

/// The set of walls whose cumulative grid is positive at each voxel, in C order.
pub fn touching_walls(shape: [u32; 3], outputs: &[WallOutput]) -> Vec<WallMask> {
    let num_voxels = shape.iter().map(|s| *s as usize).product();
    let mut masks = vec![WallMask::empty(); num_voxels];

    for wall_output in outputs {
        for (mask, value) in masks
            .iter_mut()
            .zip(wall_output.output.cumulative.data().iter())
        {
            if *value > 0.0 {
                *mask |= wall_output.wall.mask();
            }
        }
    }

    masks
}

/// Folds the per-wall cumulative grids into a single consensus grid.
///
/// Each voxel receives the sum of every wall's value if it is seen by more than one
/// independent source, and zero otherwise. The number of sources is the number of
/// walls with a positive value at the voxel, except that a voxel seen by exactly two
/// opposite walls counts as a single source: both walls recorded the same crossing
/// track.
pub fn fold_walls(shape: [u32; 3], outputs: &[WallOutput]) -> DenseGrid {
    let mut grid_sum = DenseGrid::zeros(shape);

    for wall_output in outputs {
        grid_sum.add_grid(&wall_output.output.cumulative);
    }

    let masks = touching_walls(shape, outputs);

    for (value, mask) in grid_sum.data_mut().iter_mut().zip(masks) {
        if mask.consensus_count() <= 1 {
            *value = 0.0;
        }
    }

    grid_sum
}

/// Folds the per-wall grids, keeping each wall's contribution in its own channel.
///
/// Channel `w` holds the cumulative grid of wall `w` wherever the consensus grid of
/// [`fold_walls`] is positive, and zero elsewhere.
pub fn fold_walls_keep_walls(shape: [u32; 3], outputs: &[WallOutput]) -> ChannelGrid {
    let folded = fold_walls(shape, outputs);
    let mut result = ChannelGrid::zeros(shape, Wall::COUNT);

    for wall_output in outputs {
        let mut masked = wall_output.output.cumulative.clone();

        for (value, folded) in masked.data_mut().iter_mut().zip(folded.data()) {
            if *folded <= 0.0 {
                *value = 0.0;
            }
        }

        result.set_channel(wall_output.wall.index(), &masked);
    }

    result
}

/// Folds per-wall outputs into a single [`GridOutput`].
///
/// The cumulative grid is the consensus grid of [`fold_walls`]. Distance grids are
/// summed across walls. Per-segment grids are scattered back to the batch index of
/// their segment, producing `num_segments` grids (zero for segments without crossings).
pub fn fold_outputs(shape: [u32; 3], num_segments: usize, outputs: Vec<WallOutput>) -> GridOutput {
    let cumulative = fold_walls(shape, &outputs);
    let mut distance: Option<DenseGrid> = None;
    let mut per_segment: Option<Vec<DenseGrid>> = None;
    let mut per_segment_distance: Option<Vec<DenseGrid>> = None;

    for wall_output in outputs {
        let WallOutput {
            indices, output, ..
        } = wall_output;

        if let Some(wall_distance) = output.distance {
            distance
                .get_or_insert_with(|| DenseGrid::zeros(shape))
                .add_grid(&wall_distance);
        }

        if let Some(grids) = output.per_segment {
            scatter(&mut per_segment, shape, num_segments, &indices, grids);
        }

        if let Some(grids) = output.per_segment_distance {
            scatter(&mut per_segment_distance, shape, num_segments, &indices, grids);
        }
    }

    GridOutput {
        cumulative,
        per_segment,
        distance,
        per_segment_distance,
    }
}

fn scatter(
    dst: &mut Option<Vec<DenseGrid>>,
    shape: [u32; 3],
    num_segments: usize,
    indices: &[usize],
    grids: Vec<DenseGrid>,
) {
    let dst = dst.get_or_insert_with(|| vec![DenseGrid::zeros(shape); num_segments]);

    for (index, grid) in indices.iter().zip(grids) {
        if let Some(slot) = dst.get_mut(*index) {
            *slot = grid;
        }
    }
}
