use crate::math::Real;
use crate::utils::c_order_key;
use crate::voxelization::DenseGrid;
use rstar::primitives::GeomWithData;
use rstar::RTree;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// A positive voxel: its integer coordinates, C-order index and value.
type Source = GeomWithData<[i64; 3], (usize, Real)>;

/// Fills the empty voxels of `grid` with an exponentially decayed copy of their nearest
/// positive voxel.
///
/// Every voxel equal to zero receives `exp(-d) * v`, where `v` is the value of the
/// nearest voxel with a positive value and `d` its Euclidean distance in index space.
/// Ties go to the nearest voxel coming first in C order. Negative voxels are left as-is
/// and are never a source. A grid without positive voxel is returned unchanged.
pub fn decay_fill(grid: &DenseGrid) -> DenseGrid {
    let shape = grid.shape();
    let sources: Vec<Source> = grid
        .data()
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0.0)
        .map(|(i, v)| GeomWithData::new(voxel_coords(shape, i), (i, *v)))
        .collect();

    if sources.is_empty() {
        return grid.clone();
    }

    let tree = RTree::bulk_load(sources);

    let fill = |(i, value): (usize, &Real)| {
        if *value != 0.0 {
            return *value;
        }

        let mut nearest = tree.nearest_neighbor_iter_with_distance_2(&voxel_coords(shape, i));
        let Some((first, best_sq)) = nearest.next() else {
            return *value;
        };

        // Integer distances make ties exact.
        let (_, best_value) = nearest
            .take_while(|(_, dist_sq)| *dist_sq == best_sq)
            .map(|(source, _)| source.data)
            .fold(first.data, |best, candidate| {
                if candidate.0 < best.0 {
                    candidate
                } else {
                    best
                }
            });

        (-(best_sq as Real).sqrt()).exp() * best_value
    };

    #[cfg(feature = "parallel")]
    let data: Vec<Real> = grid.data().par_iter().enumerate().map(fill).collect();
    #[cfg(not(feature = "parallel"))]
    let data: Vec<Real> = grid.data().iter().enumerate().map(fill).collect();

    let mut result = DenseGrid::zeros(shape);
    result.data_mut().copy_from_slice(&data);
    result
}

fn voxel_coords(shape: [u32; 3], index: usize) -> [i64; 3] {
    let key = c_order_key(shape, index);
    [key.x as i64, key.y as i64, key.z as i64]
}
