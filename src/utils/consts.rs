use crate::math::Real;

/// Inward nudge applied to clipped end points lying on a `maxs` face.
pub(crate) const DEFAULT_CLIP_EPSILON: Real = 1.0e-6;
/// Voxel edges below this length (in mm) trigger a warning.
pub(crate) const FINE_VOXEL_WARNING_MM: Real = 0.5;
/// Number of bits of each voxel coordinate inside a packed segment key.
pub(crate) const PACKED_KEY_BITS: u32 = 21;
/// Largest number of voxels allowed along one axis of a grid.
pub(crate) const MAX_VOXELS_PER_AXIS: u32 = 1 << PACKED_KEY_BITS;
