use crate::math::{Real, VoxelKey};

/// The part of a segment lying inside of one voxel.
///
/// `t_enter` and `t_exit` are parameters along the finite segment `start -> end`,
/// `0` being the start and `1` the end. Emitted crossings always satisfy
/// `0 ≤ t_enter < t_exit ≤ 1` and their voxel always lies inside of the grid.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelCrossing {
    /// The index of the segment in its batch.
    pub ray_index: usize,
    /// The key of the crossed voxel.
    pub voxel: VoxelKey,
    /// The parameter where the segment enters the voxel.
    pub t_enter: Real,
    /// The parameter where the segment leaves the voxel.
    pub t_exit: Real,
    /// The length of the segment part inside of the voxel, in mm.
    pub distance_mm: Real,
}
