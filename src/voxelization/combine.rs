//! Merging of segments sharing the same start and end voxels.

use crate::math::{Point, Real, VoxelKey};
use crate::shape::{check_len, GridError, VoxelGrid};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::PACKED_KEY_BITS;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
const CHUNK_LEN: usize = 4096;

/// A group of segments with identical start and end voxels.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CombinedSegment {
    /// The voxel containing the start point of every member.
    pub start_voxel: VoxelKey,
    /// The voxel containing the end point of every member.
    pub end_voxel: VoxelKey,
    /// The sum of the weights of every member.
    pub weight: Real,
    /// The index of the first member of the group.
    pub representative_index: usize,
}

/// Packs the six coordinates of a `(start_voxel, end_voxel)` pair into a single key.
///
/// Both keys must lie in `[0, 2^21)` on each axis, which is guaranteed for the voxels
/// of any valid [`VoxelGrid`].
#[inline]
pub fn pack_voxel_pair(start_voxel: VoxelKey, end_voxel: VoxelKey) -> u128 {
    let mut packed = 0u128;

    for coord in start_voxel.iter().chain(end_voxel.iter()) {
        packed = (packed << PACKED_KEY_BITS) | (*coord as u32 as u128 & ((1 << PACKED_KEY_BITS) - 1));
    }

    packed
}

/// Groups segments by their `(start_voxel, end_voxel)` pair and sums the weights of
/// each group.
///
/// Groups are returned in order of first occurrence and each group remembers the index
/// of its first member, so the result is deterministic and the total weight is
/// conserved. Every start and end point must lie inside of the grid (see
/// [`VoxelGrid::index_from_position`]), otherwise [`GridError::OutOfBounds`] is returned.
pub fn combine_segments(
    grid: &VoxelGrid,
    starts: &[Point<Real>],
    ends: &[Point<Real>],
    weights: &[Real],
) -> Result<Vec<CombinedSegment>, GridError> {
    check_len("ends", starts.len(), ends.len())?;
    check_len("weights", starts.len(), weights.len())?;

    #[cfg(not(feature = "parallel"))]
    let combined = combine_range(grid, starts, ends, weights, 0)?;

    #[cfg(feature = "parallel")]
    let combined = {
        let chunks = starts
            .par_chunks(CHUNK_LEN)
            .zip(ends.par_chunks(CHUNK_LEN))
            .zip(weights.par_chunks(CHUNK_LEN))
            .enumerate()
            .map(|(i, ((starts, ends), weights))| {
                combine_range(grid, starts, ends, weights, i * CHUNK_LEN)
            })
            .collect::<Result<Vec<_>, _>>()?;
        merge_groups(chunks.into_iter().flatten())
    };

    log::debug!(
        "combined {} segments into {} groups",
        starts.len(),
        combined.len()
    );

    Ok(combined)
}

fn combine_range(
    grid: &VoxelGrid,
    starts: &[Point<Real>],
    ends: &[Point<Real>],
    weights: &[Real],
    first_index: usize,
) -> Result<Vec<CombinedSegment>, GridError> {
    let mut groups = Vec::new();
    let mut group_ids: HashMap<u128, usize> = HashMap::default();

    for (i, ((start, end), weight)) in starts.iter().zip(ends).zip(weights).enumerate() {
        let start_voxel = grid.index_from_position(start)?;
        let end_voxel = grid.index_from_position(end)?;

        match group_ids.entry(pack_voxel_pair(start_voxel, end_voxel)) {
            Entry::Occupied(entry) => {
                let group: &mut CombinedSegment = &mut groups[*entry.get()];
                group.weight += *weight;
            }
            Entry::Vacant(entry) => {
                let _ = entry.insert(groups.len());
                groups.push(CombinedSegment {
                    start_voxel,
                    end_voxel,
                    weight: *weight,
                    representative_index: first_index + i,
                });
            }
        }
    }

    Ok(groups)
}

#[cfg(feature = "parallel")]
fn merge_groups(groups: impl Iterator<Item = CombinedSegment>) -> Vec<CombinedSegment> {
    let mut merged: Vec<CombinedSegment> = Vec::new();
    let mut group_ids: HashMap<u128, usize> = HashMap::default();

    for group in groups {
        match group_ids.entry(pack_voxel_pair(group.start_voxel, group.end_voxel)) {
            Entry::Occupied(entry) => merged[*entry.get()].weight += group.weight,
            Entry::Vacant(entry) => {
                let _ = entry.insert(merged.len());
                merged.push(group);
            }
        }
    }

    merged
}
