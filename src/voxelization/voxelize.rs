use crate::math::{Point, Real};
use crate::query::{clip_rays, voxel_crossings};
use crate::shape::{check_len, GridError, SegmentBatch, VoxelGrid, Wall, WeightDomain};
use crate::utils::DEFAULT_CLIP_EPSILON;
use crate::voxelization::walls::{
    fold_outputs, fold_walls_keep_walls, partition_by_wall, stack_walls, WallOutput, WallStack,
};
use crate::voxelization::{
    accumulate, combine_segments, ChannelGrid, DenseGrid, GridOutput, GridRequest,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How segments labeled with a detector wall are accumulated.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WallMode {
    /// Wall labels are ignored and every segment is accumulated into the same grids.
    #[default]
    Ignore,
    /// Each wall is accumulated separately and the cumulative grids are stacked
    /// along a trailing channel axis.
    Stack,
    /// Each wall is accumulated separately, then the cumulative grids are folded into
    /// one consensus grid keeping only voxels seen by more than one source.
    Fold,
    /// Like [`WallMode::Fold`], but each wall's contribution to the kept voxels is
    /// returned in its own channel.
    FoldKeepWalls,
}

/// Options of a voxelization.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelizationOptions {
    /// The grids to produce.
    pub request: GridRequest,
    /// Merge segments sharing the same start and end voxels before the traversal.
    pub combine: bool,
    /// How wall labels are used.
    pub walls: WallMode,
    /// The accepted range of segment weights.
    pub weight_domain: WeightDomain,
    /// The inward nudge applied to end points lying on a `maxs` face of the grid.
    pub clip_epsilon: Real,
}

impl Default for VoxelizationOptions {
    fn default() -> Self {
        Self {
            request: GridRequest::default(),
            combine: false,
            walls: WallMode::Ignore,
            weight_domain: WeightDomain::Positive,
            clip_epsilon: DEFAULT_CLIP_EPSILON,
        }
    }
}

impl VoxelizationOptions {
    /// Sets the grids to produce.
    pub fn request(mut self, request: GridRequest) -> Self {
        self.request = request;
        self
    }

    /// Sets whether duplicate segments are merged before the traversal.
    pub fn combine(mut self, combine: bool) -> Self {
        self.combine = combine;
        self
    }

    /// Sets how wall labels are used.
    pub fn walls(mut self, walls: WallMode) -> Self {
        self.walls = walls;
        self
    }

    /// Sets the accepted range of segment weights.
    pub fn weight_domain(mut self, weight_domain: WeightDomain) -> Self {
        self.weight_domain = weight_domain;
        self
    }

    /// Sets the inward nudge applied to clipped end points.
    pub fn clip_epsilon(mut self, clip_epsilon: Real) -> Self {
        self.clip_epsilon = clip_epsilon;
        self
    }
}

/// The result of a voxelization, depending on its [`WallMode`].
#[derive(Clone, Debug, PartialEq)]
pub enum Voxelization {
    /// Wall labels were ignored.
    Plain(GridOutput),
    /// Per-wall grids, stacked.
    Stacked(WallStack),
    /// Per-wall grids folded into a consensus grid.
    Folded(GridOutput),
    /// Per-wall grids folded into a consensus grid, one channel per wall.
    FoldedWithWalls(ChannelGrid),
}

impl Voxelization {
    /// The output of a voxelization ignoring walls, if this is one.
    pub fn as_plain(&self) -> Option<&GridOutput> {
        match self {
            Voxelization::Plain(output) => Some(output),
            _ => None,
        }
    }

    /// The per-wall stack, if this is a stacked voxelization.
    pub fn as_stacked(&self) -> Option<&WallStack> {
        match self {
            Voxelization::Stacked(stack) => Some(stack),
            _ => None,
        }
    }

    /// The folded output, if this is a folded voxelization.
    pub fn as_folded(&self) -> Option<&GridOutput> {
        match self {
            Voxelization::Folded(output) => Some(output),
            _ => None,
        }
    }

    /// The per-wall folded channels, if this is a folded voxelization keeping walls.
    pub fn as_folded_with_walls(&self) -> Option<&ChannelGrid> {
        match self {
            Voxelization::FoldedWithWalls(grid) => Some(grid),
            _ => None,
        }
    }
}

/// A segment actually handed over to the traversal.
#[derive(Copy, Clone, Debug)]
struct TraversedSegment {
    // Index of the segment (or of the first member of its group) in the batch.
    index: usize,
    start: Point<Real>,
    end: Point<Real>,
    weight: Real,
}

/// Builds the voxel grids of a batch of half-lines.
///
/// Every `(start, direction)` pair of `batch` is extended until it leaves the grid (see
/// [`clip_rays`]); pairs missing the grid are dropped. The resulting finite segments are
/// traversed and accumulated according to `options`.
///
/// With `options.combine`, segments entering and leaving the grid through the same pair
/// of voxels (see [`combine_segments`]) are traversed once, along the first of them, with
/// their summed weight. Duplicated segments thus give the same cumulative and distance
/// grids as without merging.
///
/// Per-segment grids are indexed by batch index: a merged group contributes
/// to the grid of its first member, and dropped segments have all-zero grids.
///
/// The batch is fully validated before any traversal: mismatched array lengths, weights
/// outside of `options.weight_domain`, and wall modes without wall labels are errors.
pub fn voxelize(
    grid: &VoxelGrid,
    batch: &SegmentBatch,
    options: &VoxelizationOptions,
) -> Result<Voxelization, GridError> {
    batch.validate(options.weight_domain)?;

    let walls = match (options.walls, &batch.walls) {
        (WallMode::Ignore, _) => None,
        (_, Some(walls)) => Some(walls.as_slice()),
        (_, None) => return Err(GridError::MissingWalls),
    };

    let ends = clip_rays(grid, &batch.starts, &batch.directions, options.clip_epsilon)?;
    let mut traversed: Vec<TraversedSegment> = ends
        .into_iter()
        .enumerate()
        .filter_map(|(index, end)| {
            end.map(|end| TraversedSegment {
                index,
                start: batch.starts[index],
                end,
                weight: batch.weight(index),
            })
        })
        .collect();

    if options.combine {
        traversed = combine_traversed(grid, &traversed, options.clip_epsilon)?;
    }

    let shape = grid.shape();
    let num_segments = batch.len();

    let Some(walls) = walls else {
        let output = accumulate_traversed(grid, &traversed, &options.request)?;
        return Ok(Voxelization::Plain(scatter_output(
            shape,
            num_segments,
            &traversed,
            output,
        )));
    };

    let segment_walls: Vec<Wall> = traversed.iter().map(|s| walls[s.index]).collect();
    let buckets = partition_by_wall(&segment_walls);
    let wall_outputs = accumulate_walls(grid, &traversed, &buckets, &options.request)?;

    Ok(match options.walls {
        WallMode::Stack => Voxelization::Stacked(WallStack {
            stacked: stack_walls(shape, &wall_outputs),
            walls: wall_outputs,
        }),
        WallMode::FoldKeepWalls => {
            Voxelization::FoldedWithWalls(fold_walls_keep_walls(shape, &wall_outputs))
        }
        WallMode::Fold | WallMode::Ignore => {
            Voxelization::Folded(fold_outputs(shape, num_segments, wall_outputs))
        }
    })
}

/// Builds one voxelization per time bin.
///
/// `bins[i]` is the time bin of the `i`-th segment of `batch`. The `b`-th result is the
/// voxelization of the segments of bin `b` only, for `b` in `0..num_bins`; per-segment
/// grids of each result are indexed by position within that bin. Fails with
/// [`GridError::OutOfBounds`] if a bin label is not smaller than `num_bins`.
pub fn voxelize_time_bins(
    grid: &VoxelGrid,
    batch: &SegmentBatch,
    bins: &[usize],
    num_bins: usize,
    options: &VoxelizationOptions,
) -> Result<Vec<Voxelization>, GridError> {
    check_len("bins", batch.len(), bins.len())?;
    batch.validate(options.weight_domain)?;

    if bins.iter().any(|bin| *bin >= num_bins) {
        return Err(GridError::OutOfBounds);
    }

    let mut members = vec![Vec::new(); num_bins];
    for (i, bin) in bins.iter().enumerate() {
        members[*bin].push(i);
    }

    members
        .iter()
        .enumerate()
        .map(|(bin, indices)| {
            log::trace!("time bin {}: {} segments", bin, indices.len());
            voxelize(grid, &batch.select(indices), options)
        })
        .collect()
}

// Groups segments by the voxels where they enter and leave the grid. Each group is
// traversed once, along its first member, with the summed weight.
fn combine_traversed(
    grid: &VoxelGrid,
    traversed: &[TraversedSegment],
    epsilon: Real,
) -> Result<Vec<TraversedSegment>, GridError> {
    let aabb = grid.aabb();
    let mut members = Vec::with_capacity(traversed.len());
    let mut entries = Vec::with_capacity(traversed.len());
    let mut exits = Vec::with_capacity(traversed.len());

    for segment in traversed {
        // Segments crossing nothing contribute nothing either way.
        let Some(clipped) = aabb.clip_segment(&segment.start, &segment.end) else {
            continue;
        };

        members.push(*segment);
        entries.push(aabb.nudge_inside(&clipped.a, epsilon));
        exits.push(aabb.nudge_inside(&clipped.b, epsilon));
    }

    let weights: Vec<_> = members.iter().map(|s| s.weight).collect();
    let combined = combine_segments(grid, &entries, &exits, &weights)?;

    Ok(combined
        .iter()
        .map(|group| TraversedSegment {
            weight: group.weight,
            ..members[group.representative_index]
        })
        .collect())
}

fn accumulate_traversed(
    grid: &VoxelGrid,
    traversed: &[TraversedSegment],
    request: &GridRequest,
) -> Result<GridOutput, GridError> {
    let starts: Vec<_> = traversed.iter().map(|s| s.start).collect();
    let ends: Vec<_> = traversed.iter().map(|s| s.end).collect();
    let weights: Vec<_> = traversed.iter().map(|s| s.weight).collect();
    let crossings = voxel_crossings(grid, &starts, &ends)?;
    Ok(accumulate(grid.shape(), &crossings, &weights, request))
}

fn accumulate_walls(
    grid: &VoxelGrid,
    traversed: &[TraversedSegment],
    buckets: &[Vec<usize>; Wall::COUNT],
    request: &GridRequest,
) -> Result<Vec<WallOutput>, GridError> {
    let accumulate_wall = |(wall, bucket): (Wall, &Vec<usize>)| {
        let segments: Vec<_> = bucket.iter().map(|i| traversed[*i]).collect();
        accumulate_traversed(grid, &segments, request).map(|output| WallOutput {
            wall,
            indices: segments.iter().map(|s| s.index).collect(),
            output,
        })
    };

    let present: Vec<(Wall, &Vec<usize>)> = Wall::ALL
        .into_iter()
        .zip(buckets.iter())
        .filter(|(_, bucket)| !bucket.is_empty())
        .collect();

    #[cfg(feature = "parallel")]
    let outputs = present.into_par_iter().map(accumulate_wall).collect();
    #[cfg(not(feature = "parallel"))]
    let outputs = present.into_iter().map(accumulate_wall).collect();

    outputs
}

// Moves per-segment grids from traversal order to batch order.
fn scatter_output(
    shape: [u32; 3],
    num_segments: usize,
    traversed: &[TraversedSegment],
    output: GridOutput,
) -> GridOutput {
    let scatter = |grids: Option<Vec<_>>| {
        grids.map(|grids| {
            let mut result = vec![DenseGrid::zeros(shape); num_segments];
            for (segment, grid) in traversed.iter().zip(grids) {
                result[segment.index] = grid;
            }
            result
        })
    };

    GridOutput {
        cumulative: output.cumulative,
        per_segment: scatter(output.per_segment),
        distance: output.distance,
        per_segment_distance: scatter(output.per_segment_distance),
    }
}
