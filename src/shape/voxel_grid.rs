use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, VoxelKey, DIM};
use crate::shape::GridError;
use crate::utils::{c_order_index, c_order_key, FINE_VOXEL_WARNING_MM, MAX_VOXELS_PER_AXIS};

/// A regular axis-aligned voxel grid tiling a detector box.
///
/// The grid covers the half-open box `[mins, maxs)` with `shape[i]` voxels of size
/// `voxel_size[i] = (maxs[i] - mins[i]) / shape[i]` along each axis. Voxel keys are
/// integer coordinates in `[0, shape)`. Dense grids built on top of it are stored in
/// C order: `x` is the slowest axis and `z` the fastest.
///
/// # Example
///
/// ```
/// use voxtrace3d::math::Point;
/// use voxtrace3d::shape::VoxelGrid;
///
/// let grid = VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
/// let key = grid.index_from_position(&Point::new(-2.0, 0.0, 0.5)).unwrap();
/// assert_eq!(key, Point::new(0, 2, 2));
/// assert_eq!(grid.position_from_index(key).unwrap(), Point::new(-2.0, 0.0, 0.0));
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    aabb: Aabb,
    shape: [u32; 3],
    voxel_size: Vector<Real>,
}

impl VoxelGrid {
    /// Creates a grid with `shape` voxels spanning `[mins, maxs)`.
    pub fn new(mins: Point<Real>, maxs: Point<Real>, shape: [u32; 3]) -> Result<Self, GridError> {
        Self::from_aabb(Aabb::new(mins, maxs), shape)
    }

    /// Creates a grid with `shape` voxels covering the given box.
    pub fn from_aabb(aabb: Aabb, shape: [u32; 3]) -> Result<Self, GridError> {
        if shape.iter().any(|s| *s == 0 || *s > MAX_VOXELS_PER_AXIS) {
            return Err(GridError::InvalidShape(shape));
        }

        if !aabb.is_valid() {
            return Err(GridError::InvalidBounds {
                mins: aabb.mins.into(),
                maxs: aabb.maxs.into(),
            });
        }

        let shape_real = Vector::new(shape[0] as Real, shape[1] as Real, shape[2] as Real);
        let voxel_size = aabb.extents().component_div(&shape_real);

        if voxel_size.min() < FINE_VOXEL_WARNING_MM {
            log::warn!(
                "very fine voxels ({:?} mm) for grid shape {:?}: memory and time may spike",
                voxel_size.as_slice(),
                shape
            );
        }

        Ok(Self {
            aabb,
            shape,
            voxel_size,
        })
    }

    /// Creates a grid centered at the origin, spanning `[-dimensions / 2, dimensions / 2)`.
    ///
    /// `dimensions` are the full side lengths of the detector, in mm.
    pub fn centered(shape: [u32; 3], dimensions: [Real; 3]) -> Result<Self, GridError> {
        if dimensions.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(GridError::InvalidDimensions(dimensions));
        }

        Self::from_aabb(Aabb::centered(Vector::from(dimensions)), shape)
    }

    /// The box covered by this grid.
    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// The lower corner of this grid.
    #[inline]
    pub fn mins(&self) -> Point<Real> {
        self.aabb.mins
    }

    /// The upper corner of this grid.
    #[inline]
    pub fn maxs(&self) -> Point<Real> {
        self.aabb.maxs
    }

    /// The number of voxels along each axis.
    #[inline]
    pub fn shape(&self) -> [u32; 3] {
        self.shape
    }

    /// The side lengths of every voxel.
    #[inline]
    pub fn voxel_size(&self) -> Vector<Real> {
        self.voxel_size
    }

    /// The side lengths of the whole grid.
    #[inline]
    pub fn dimensions(&self) -> Vector<Real> {
        self.aabb.extents()
    }

    /// The total number of voxels of this grid.
    #[inline]
    pub fn num_voxels(&self) -> usize {
        self.shape.iter().map(|s| *s as usize).product()
    }

    /// The key of the voxel containing `position`.
    ///
    /// Fails with [`GridError::OutOfBounds`] unless `position` lies in `[mins, maxs)`.
    pub fn index_from_position(&self, position: &Point<Real>) -> Result<VoxelKey, GridError> {
        if !self.aabb.contains_local_point_half_open(position) {
            return Err(GridError::OutOfBounds);
        }

        // The division may round up to `shape` right below a `maxs` face.
        Ok(self.clamp_voxel(self.voxel_at_point_unchecked(position)))
    }

    /// The lower corner of the voxel with the given key.
    ///
    /// Fails with [`GridError::OutOfBounds`] unless `key` lies in `[0, shape)`.
    pub fn position_from_index(&self, key: VoxelKey) -> Result<Point<Real>, GridError> {
        if !self.contains_voxel(key) {
            return Err(GridError::OutOfBounds);
        }

        Ok(self.voxel_lower_corner(key))
    }

    /// The key of the voxel containing `point`, without any bounds check.
    ///
    /// The result may lie outside of `[0, shape)`.
    #[inline]
    pub fn voxel_at_point_unchecked(&self, point: &Point<Real>) -> VoxelKey {
        (point - self.aabb.mins)
            .component_div(&self.voxel_size)
            .map(|x| x.floor() as i32)
            .into()
    }

    /// Clamps the given voxel key into `[0, shape)`.
    #[inline]
    pub fn clamp_voxel(&self, key: VoxelKey) -> VoxelKey {
        let mut result = key;

        for i in 0..DIM {
            result[i] = result[i].clamp(0, self.shape[i] as i32 - 1);
        }

        result
    }

    /// Does `key` lie in `[0, shape)`?
    #[inline]
    pub fn contains_voxel(&self, key: VoxelKey) -> bool {
        (0..DIM).all(|i| key[i] >= 0 && (key[i] as u32) < self.shape[i])
    }

    /// The C-order linear index of the given voxel, if it lies inside of the grid.
    #[inline]
    pub fn linear_index(&self, key: VoxelKey) -> Option<usize> {
        c_order_index(self.shape, key)
    }

    /// The voxel key associated to a C-order linear index.
    #[inline]
    pub fn voxel_at_linear_index(&self, index: usize) -> Option<VoxelKey> {
        if index >= self.num_voxels() {
            return None;
        }

        Some(c_order_key(self.shape, index))
    }

    /// The lower corner of the voxel with the given key, without any bounds check.
    #[inline]
    pub fn voxel_lower_corner(&self, key: VoxelKey) -> Point<Real> {
        self.aabb.mins + key.coords.cast::<Real>().component_mul(&self.voxel_size)
    }

    /// The AABB of the voxel with the given key.
    pub fn voxel_aabb(&self, key: VoxelKey) -> Aabb {
        let mins = self.voxel_lower_corner(key);
        Aabb::new(mins, mins + self.voxel_size)
    }

    /// The center of the voxel with the given key.
    pub fn voxel_center(&self, key: VoxelKey) -> Point<Real> {
        self.voxel_lower_corner(key) + self.voxel_size / 2.0
    }

    /// All the voxel keys of this grid, in C order.
    pub fn voxel_keys(&self) -> impl Iterator<Item = VoxelKey> + '_ {
        let [sx, sy, sz] = self.shape.map(|s| s as i32);
        (0..sx).flat_map(move |x| {
            (0..sy).flat_map(move |y| (0..sz).map(move |z| VoxelKey::new(x, y, z)))
        })
    }

    /// The centers of all the voxels of this grid, in C order.
    pub fn voxel_centers(&self) -> impl Iterator<Item = Point<Real>> + '_ {
        self.voxel_keys().map(|key| self.voxel_center(key))
    }

    /// The lower corners of all the voxels of this grid, in C order.
    pub fn voxel_lower_corners(&self) -> impl Iterator<Item = Point<Real>> + '_ {
        self.voxel_keys().map(|key| self.voxel_lower_corner(key))
    }
}
