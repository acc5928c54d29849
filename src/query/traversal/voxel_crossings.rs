use crate::math::{Point, Real};
use crate::query::VoxelCrossing;
use crate::shape::{check_len, GridError, VoxelGrid};

#[cfg(not(feature = "parallel"))]
use crate::query::traverse_segment;
#[cfg(feature = "parallel")]
use {crate::query::segment_crossings, rayon::prelude::*};

/// Computes the voxel crossings of every segment `starts[i] -> ends[i]`.
///
/// Crossings are ordered by segment index, then in traversal order along each segment.
/// The `ray_index` of each crossing is the index of its segment in the input arrays.
/// With the `parallel` feature, segments are traversed on the rayon thread pool and the
/// result is identical to the sequential one.
///
/// Fails with [`GridError::LengthMismatch`] if both arrays have different lengths.
pub fn voxel_crossings(
    grid: &VoxelGrid,
    starts: &[Point<Real>],
    ends: &[Point<Real>],
) -> Result<Vec<VoxelCrossing>, GridError> {
    check_len("ends", starts.len(), ends.len())?;

    #[cfg(feature = "parallel")]
    {
        let per_segment: Vec<Vec<VoxelCrossing>> = starts
            .par_iter()
            .zip(ends.par_iter())
            .enumerate()
            .map(|(i, (start, end))| segment_crossings(grid, i, start, end))
            .collect();
        Ok(per_segment.concat())
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut crossings = Vec::with_capacity(starts.len());

        for (i, (start, end)) in starts.iter().zip(ends.iter()).enumerate() {
            traverse_segment(grid, i, start, end, &mut |crossing| {
                crossings.push(crossing)
            });
        }

        Ok(crossings)
    }
}
