use crate::math::{Real, VoxelKey};
use crate::shape::{check_len, GridError};
use crate::utils::{c_order_index, c_order_key};

/// A dense scalar field over the voxels of a grid.
///
/// Values are stored in C order (`x` slowest, `z` fastest), so `data()` can be handed
/// over as-is to any consumer expecting a row-major `(nx, ny, nz)` array.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct DenseGrid {
    shape: [u32; 3],
    data: Vec<Real>,
}

impl DenseGrid {
    /// A grid of the given shape filled with zeros.
    pub fn zeros(shape: [u32; 3]) -> Self {
        let len = shape.iter().map(|s| *s as usize).product();
        Self {
            shape,
            data: vec![0.0; len],
        }
    }

    /// Wraps C-order `data` into a grid of the given shape.
    pub fn from_vec(shape: [u32; 3], data: Vec<Real>) -> Result<Self, GridError> {
        let expected = shape.iter().map(|s| *s as usize).product();
        check_len("data", expected, data.len())?;
        Ok(Self { shape, data })
    }

    /// The number of voxels along each axis.
    #[inline]
    pub fn shape(&self) -> [u32; 3] {
        self.shape
    }

    /// The values of this grid, in C order.
    #[inline]
    pub fn data(&self) -> &[Real] {
        &self.data
    }

    /// The values of this grid, in C order, mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Real] {
        &mut self.data
    }

    /// The C-order index of `key`, if it lies inside of this grid.
    #[inline]
    pub fn linear_index(&self, key: VoxelKey) -> Option<usize> {
        c_order_index(self.shape, key)
    }

    /// The value at `key`, if it lies inside of this grid.
    #[inline]
    pub fn get(&self, key: VoxelKey) -> Option<Real> {
        self.linear_index(key).map(|i| self.data[i])
    }

    /// Adds `value` to the voxel at `key`.
    ///
    /// Keys outside of this grid are ignored.
    #[inline]
    pub fn add(&mut self, key: VoxelKey, value: Real) {
        if let Some(i) = self.linear_index(key) {
            self.data[i] += value;
        }
    }

    /// Adds `other` to this grid, voxel by voxel.
    pub fn add_grid(&mut self, other: &DenseGrid) {
        debug_assert_eq!(self.shape, other.shape);
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += *b;
        }
    }

    /// The sum of all the values of this grid.
    pub fn sum(&self) -> Real {
        self.data.iter().sum()
    }

    /// The number of voxels with a non-zero value.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|v| **v != 0.0).count()
    }

    /// Iterates through the non-zero voxels of this grid, in C order.
    pub fn nonzero_voxels(&self) -> impl Iterator<Item = (VoxelKey, Real)> + '_ {
        let shape = self.shape;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(move |(i, v)| (c_order_key(shape, i), *v))
    }
}

/// A stack of dense grids sharing the same shape, with the channel axis last.
///
/// This is the `(nx, ny, nz, channels)` layout of stacked wall grids: the value of
/// channel `c` at voxel `(x, y, z)` is at index `linear_index(x, y, z) * channels + c`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelGrid {
    shape: [u32; 3],
    channels: usize,
    data: Vec<Real>,
}

impl ChannelGrid {
    /// A channel grid filled with zeros.
    pub fn zeros(shape: [u32; 3], channels: usize) -> Self {
        let len = shape.iter().map(|s| *s as usize).product::<usize>() * channels;
        Self {
            shape,
            channels,
            data: vec![0.0; len],
        }
    }

    /// The spatial shape of every channel.
    #[inline]
    pub fn shape(&self) -> [u32; 3] {
        self.shape
    }

    /// The number of channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The values of this grid, channel axis last.
    #[inline]
    pub fn data(&self) -> &[Real] {
        &self.data
    }

    /// The value of `channel` at `key`.
    pub fn get(&self, key: VoxelKey, channel: usize) -> Option<Real> {
        if channel >= self.channels {
            return None;
        }

        c_order_index(self.shape, key).map(|i| self.data[i * self.channels + channel])
    }

    /// Overwrites one channel with the content of `grid`.
    pub fn set_channel(&mut self, channel: usize, grid: &DenseGrid) {
        debug_assert_eq!(self.shape, grid.shape());
        if channel >= self.channels {
            return;
        }

        for (i, value) in grid.data().iter().enumerate() {
            self.data[i * self.channels + channel] = *value;
        }
    }

    /// Extracts one channel as a dense grid.
    pub fn channel(&self, channel: usize) -> Option<DenseGrid> {
        if channel >= self.channels {
            return None;
        }

        let data = self
            .data
            .iter()
            .skip(channel)
            .step_by(self.channels)
            .copied()
            .collect();
        Some(DenseGrid {
            shape: self.shape,
            data,
        })
    }

    /// The values of this grid with the channel axis first, i.e., in `(channels, nx, ny, nz)`
    /// C order.
    pub fn channels_first(&self) -> Vec<Real> {
        let num_voxels = self.data.len() / self.channels.max(1);
        let mut result = vec![0.0; self.data.len()];

        for (i, value) in self.data.iter().enumerate() {
            let voxel = i / self.channels;
            let channel = i % self.channels;
            result[channel * num_voxels + voxel] = *value;
        }

        result
    }
}
