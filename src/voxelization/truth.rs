use crate::math::{Point, Real, VoxelKey, DIM};
use crate::shape::VoxelGrid;
use crate::voxelization::DenseGrid;

/// The occupancy grid of a set of truth points.
#[derive(Clone, Debug, PartialEq)]
pub struct TruthGrid {
    /// The number of points falling inside of each voxel.
    pub grid: DenseGrid,
    /// The number of points outside of the grid, or with non-finite coordinates.
    pub dropped: usize,
}

/// Bins every point into the voxel containing it and counts the points of each voxel.
///
/// The voxel of `point` is `floor((point - mins) * shape / dimensions)`. Points whose
/// voxel lies outside of `[0, shape)`, and non-finite points, are silently dropped and
/// only reported through [`TruthGrid::dropped`].
///
/// # Example
///
/// ```
/// use voxtrace3d::math::Point;
/// use voxtrace3d::shape::VoxelGrid;
/// use voxtrace3d::voxelization::rasterize_truth;
///
/// let grid = VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
/// let truth = rasterize_truth(&grid, &[Point::origin(), Point::new(4.0, 0.0, 0.0)]);
/// assert_eq!(truth.dropped, 1);
/// assert_eq!(truth.grid.get(Point::new(2, 2, 2)), Some(1.0));
/// ```
pub fn rasterize_truth(grid: &VoxelGrid, points: &[Point<Real>]) -> TruthGrid {
    let shape = grid.shape();
    let mins = grid.mins();
    let dimensions = grid.dimensions();
    let mut result = DenseGrid::zeros(shape);
    let mut dropped = 0;

    for point in points {
        let mut key = VoxelKey::origin();
        let mut inside = true;

        for i in 0..DIM {
            let coord = ((point[i] - mins[i]) * shape[i] as Real / dimensions[i]).floor();

            if !(coord >= 0.0 && coord < shape[i] as Real) {
                inside = false;
                break;
            }

            key[i] = coord as i32;
        }

        if inside {
            result.add(key, 1.0);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        log::debug!(
            "dropped {} of {} truth points outside of the grid",
            dropped,
            points.len()
        );
    }

    TruthGrid {
        grid: result,
        dropped,
    }
}
