use crate::math::Real;

/// Errors raised while building grids or validating segment batches.
///
/// Every variant is a configuration or contract error detected before any
/// traversal work starts. Geometric non-events (a segment missing the grid, a
/// grazing crossing, a truth point outside the detector) are never errors.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum GridError {
    /// A grid shape component is zero or too large to be indexed.
    #[error("invalid grid shape {0:?}: every component must be in [1, 2^21]")]
    InvalidShape([u32; 3]),
    /// The grid bounds are not finite or not strictly increasing.
    #[error("invalid grid bounds: mins {mins:?} must be finite and strictly below maxs {maxs:?}")]
    InvalidBounds {
        /// The rejected lower bound.
        mins: [Real; 3],
        /// The rejected upper bound.
        maxs: [Real; 3],
    },
    /// Detector dimensions must be finite and positive.
    #[error("invalid detector dimensions {0:?}: every component must be finite and positive")]
    InvalidDimensions([Real; 3]),
    /// Two parallel input arrays have different lengths.
    #[error("length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        /// The name of the offending array.
        what: &'static str,
        /// The expected length.
        expected: usize,
        /// The actual length.
        found: usize,
    },
    /// A segment weight lies outside the accepted weight domain.
    #[error("invalid weight {weight} for segment {index}")]
    InvalidWeight {
        /// The index of the segment carrying the weight.
        index: usize,
        /// The rejected weight.
        weight: Real,
    },
    /// A wall-aware build was requested but the segments carry no wall labels.
    #[error("wall labels are required by the requested wall mode")]
    MissingWalls,
    /// A position or voxel index lies outside the grid.
    #[error("position or voxel index outside of the grid")]
    OutOfBounds,
    /// A wall label could not be parsed.
    #[error("unknown wall label {0:?}, expected one of +x, -x, +y, -y, +z, -z")]
    UnknownWall(String),
}
