//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};

/// An Axis-Aligned Bounding Box (AABB).
///
/// This is the box enclosing a detector volume: every voxel grid of this crate
/// tiles exactly one `Aabb`.
///
/// # Structure
///
/// - **mins**: the point with the smallest coordinates on each axis.
/// - **maxs**: the point with the largest coordinates on each axis.
/// - **Invariant**: `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y`, `mins.z ≤ maxs.z`.
///
/// # Example
///
/// ```
/// use voxtrace3d::bounding_volume::Aabb;
/// use voxtrace3d::math::{Point, Vector};
///
/// // A detector of 4x2x2 mm centered at the origin.
/// let aabb = Aabb::centered(Vector::new(4.0, 2.0, 2.0));
///
/// assert_eq!(aabb.mins, Point::new(-2.0, -1.0, -1.0));
/// assert_eq!(aabb.maxs, Point::new(2.0, 1.0, 1.0));
/// assert!(aabb.contains_local_point(&Point::origin()));
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// # Arguments
    ///
    /// * `mins` - The point with minimum coordinates.
    /// * `maxs` - The point with maximum coordinates. Each component of `maxs`
    ///   should be greater than the corresponding component of `mins`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates the AABB `[-dimensions / 2, dimensions / 2]` centered at the origin.
    ///
    /// This is the convention used for detector volumes: coordinates are
    /// detector-centered and `dimensions` holds the full side lengths.
    #[inline]
    pub fn centered(dimensions: Vector<Real>) -> Self {
        Self::from_half_extents(Point::origin(), dimensions * 0.5)
    }

    /// Returns the center point of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// Returns the half-extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents (full side lengths) of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Is every bound finite, with `mins < maxs` strictly on each axis?
    pub fn is_valid(&self) -> bool {
        (0..DIM).all(|i| {
            self.mins[i].is_finite() && self.maxs[i].is_finite() && self.mins[i] < self.maxs[i]
        })
    }

    /// Does this AABB contains a point expressed in the same coordinate frame as `self`?
    ///
    /// Both faces of each slab are considered inside.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Does the half-open box `[mins, maxs)` contain this point?
    ///
    /// This is the domain of voxel index computations: a point lying exactly on a
    /// `maxs` face has no voxel.
    #[inline]
    pub fn contains_local_point_half_open(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if !(point[i] >= self.mins[i] && point[i] < self.maxs[i]) {
                return false;
            }
        }

        true
    }

    /// Moves every component of `point` into `[mins, maxs - epsilon]`.
    ///
    /// Components exactly on (or beyond) a `maxs` face are nudged `epsilon` inward so
    /// the result always has a voxel.
    #[inline]
    pub fn nudge_inside(&self, point: &Point<Real>, epsilon: Real) -> Point<Real> {
        let mut result = *point;

        for i in 0..DIM {
            if result[i] >= self.maxs[i] {
                result[i] = self.maxs[i] - epsilon;
            }
            if result[i] < self.mins[i] {
                result[i] = self.mins[i];
            }
        }

        result
    }
}

#[cfg(test)]
mod test {
    use super::Aabb;
    use crate::math::{Point, Real, Vector};

    #[test]
    fn centered_aabb_is_symmetric() {
        let aabb = Aabb::centered(Vector::new(2420.0, 2420.0, 1000.0));
        assert_eq!(aabb.center(), Point::origin());
        assert_eq!(aabb.extents(), Vector::new(2420.0, 2420.0, 1000.0));
        assert_eq!(aabb.half_extents(), Vector::new(1210.0, 1210.0, 500.0));
        assert!(aabb.is_valid());
    }

    #[test]
    fn half_open_containment_excludes_max_faces() {
        let aabb = Aabb::centered(Vector::new(4.0, 4.0, 4.0));
        assert!(aabb.contains_local_point(&Point::new(2.0, 0.0, 0.0)));
        assert!(!aabb.contains_local_point_half_open(&Point::new(2.0, 0.0, 0.0)));
        assert!(aabb.contains_local_point_half_open(&Point::new(-2.0, 0.0, 0.0)));
    }

    #[test]
    fn nudge_inside_moves_max_faces_only_inward() {
        let aabb = Aabb::centered(Vector::new(4.0, 4.0, 4.0));
        let nudged = aabb.nudge_inside(&Point::new(2.0, -2.0, 1.0), 1.0e-6);
        assert_relative_eq!(nudged, Point::new(2.0 - 1.0e-6, -2.0, 1.0));
        assert!(aabb.contains_local_point_half_open(&nudged));
    }

    #[test]
    fn degenerate_aabb_is_invalid() {
        let flat = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 1.0));
        assert!(!flat.is_valid());
        let nan = Aabb::new(Point::new(Real::NAN, 0.0, 0.0), Point::new(1.0, 1.0, 1.0));
        assert!(!nan.is_valid());
    }
}
