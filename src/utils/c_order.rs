use crate::math::{VoxelKey, DIM};

/// The C-order (`x` slowest, `z` fastest) linear index of `key` in a grid of the given shape.
#[inline]
pub(crate) fn c_order_index(shape: [u32; 3], key: VoxelKey) -> Option<usize> {
    if (0..DIM).any(|i| key[i] < 0 || key[i] as u32 >= shape[i]) {
        return None;
    }

    let [_, sy, sz] = shape.map(|s| s as usize);
    Some((key.x as usize * sy + key.y as usize) * sz + key.z as usize)
}

/// The voxel key at the C-order linear `index` of a grid of the given shape.
#[inline]
pub(crate) fn c_order_key(shape: [u32; 3], index: usize) -> VoxelKey {
    let [_, sy, sz] = shape.map(|s| s as usize);
    VoxelKey::new(
        (index / (sy * sz)) as i32,
        ((index / sz) % sy) as i32,
        (index % sz) as i32,
    )
}
