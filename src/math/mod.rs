//! Linear algebra type aliases.

pub use na::{Point3, Vector3};

/// The scalar type used throughout this crate.
pub type Real = f64;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The point type.
pub use Point3 as Point;

/// The vector type.
pub use Vector3 as Vector;

/// The integer coordinates of a voxel in a [`VoxelGrid`](crate::shape::VoxelGrid).
pub type VoxelKey = Point3<i32>;
