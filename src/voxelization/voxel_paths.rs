//! Sparse per-segment voxel paths.

use crate::math::{Point, Real, Vector, VoxelKey};
use crate::query::{clip_rays, segment_crossings, VoxelCrossing};
use crate::shape::{check_len, GridError, VoxelGrid};
use crate::voxelization::DenseGrid;

/// The default number of segments traversed per batch by [`VoxelPathTable::from_rays`].
pub const DEFAULT_PATH_BATCH_LEN: usize = 2000;

/// One voxel crossed by one segment.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelPathRow {
    /// The index of the segment in its input batch.
    pub segment_index: usize,
    /// The crossed voxel.
    pub voxel: VoxelKey,
    /// The length of the segment inside of the voxel, if distances were recorded.
    pub distance_mm: Option<Real>,
}

/// The grid description stored next to a [`VoxelPathTable`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelPathMetadata {
    /// The extents of one voxel.
    pub voxel_size_mm: [Real; 3],
    /// The number of voxels along each axis.
    pub grid_shape: [u32; 3],
    /// The extents of the whole grid.
    pub detector_size_mm: [Real; 3],
}

impl VoxelPathMetadata {
    /// The metadata of `grid`.
    pub fn from_grid(grid: &VoxelGrid) -> Self {
        Self {
            voxel_size_mm: grid.voxel_size().into(),
            grid_shape: grid.shape(),
            detector_size_mm: grid.dimensions().into(),
        }
    }
}

/// The voxels crossed by every segment of a batch, one row per `(segment, voxel)` pair.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelPathTable {
    /// The rows, grouped by segment in increasing segment order, each group in
    /// traversal order.
    pub rows: Vec<VoxelPathRow>,
    /// The grid the rows refer to.
    pub metadata: VoxelPathMetadata,
}

impl VoxelPathTable {
    /// An empty table for `grid`.
    pub fn new(grid: &VoxelGrid) -> Self {
        Self {
            rows: Vec::new(),
            metadata: VoxelPathMetadata::from_grid(grid),
        }
    }

    /// Builds the table of already-computed crossings.
    pub fn from_crossings(
        grid: &VoxelGrid,
        crossings: &[VoxelCrossing],
        include_distance: bool,
    ) -> Self {
        let mut result = Self::new(grid);
        result.extend_from_crossings(crossings, include_distance);
        result
    }

    /// Traverses the finite segments `[starts[i], ends[i]]` and records their paths.
    pub fn from_segments(
        grid: &VoxelGrid,
        starts: &[Point<Real>],
        ends: &[Point<Real>],
        include_distance: bool,
    ) -> Result<Self, GridError> {
        check_len("ends", starts.len(), ends.len())?;
        let mut result = Self::new(grid);

        for (i, (start, end)) in starts.iter().zip(ends).enumerate() {
            result.extend_from_crossings(&segment_crossings(grid, i, start, end), include_distance);
        }

        Ok(result)
    }

    /// Clips the half-lines `(starts[i], directions[i])` to the grid and records their
    /// paths.
    ///
    /// Half-lines are processed `batch_len` at a time (at least one), and every row keeps
    /// the index of its half-line in the whole input. Half-lines missing the grid have no
    /// row.
    pub fn from_rays(
        grid: &VoxelGrid,
        starts: &[Point<Real>],
        directions: &[Vector<Real>],
        include_distance: bool,
        batch_len: usize,
        clip_epsilon: Real,
    ) -> Result<Self, GridError> {
        check_len("directions", starts.len(), directions.len())?;
        let batch_len = batch_len.max(1);
        let mut result = Self::new(grid);

        for (batch_id, (starts, directions)) in starts
            .chunks(batch_len)
            .zip(directions.chunks(batch_len))
            .enumerate()
        {
            let first_index = batch_id * batch_len;
            let ends = clip_rays(grid, starts, directions, clip_epsilon)?;

            for (i, (start, end)) in starts.iter().zip(ends).enumerate() {
                if let Some(end) = end {
                    let crossings = segment_crossings(grid, first_index + i, start, &end);
                    result.extend_from_crossings(&crossings, include_distance);
                }
            }

            log::trace!(
                "voxel paths: batch {} done, {} rows so far",
                batch_id,
                result.rows.len()
            );
        }

        Ok(result)
    }

    fn extend_from_crossings(&mut self, crossings: &[VoxelCrossing], include_distance: bool) {
        self.rows.extend(crossings.iter().map(|c| VoxelPathRow {
            segment_index: c.ray_index,
            voxel: c.voxel,
            distance_mm: include_distance.then_some(c.distance_mm),
        }));
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rebuilds a dense grid from the rows.
    ///
    /// Each row adds its distance to its voxel if `use_distance` is set and the row has
    /// one, and `1` otherwise.
    pub fn to_dense(&self, use_distance: bool) -> DenseGrid {
        let mut grid = DenseGrid::zeros(self.metadata.grid_shape);

        for row in &self.rows {
            let value = match row.distance_mm {
                Some(distance) if use_distance => distance,
                _ => 1.0,
            };
            grid.add(row.voxel, value);
        }

        grid
    }
}
