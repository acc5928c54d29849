use crate::math::{Point, Real, Vector};
use crate::query::VoxelCrossing;
use crate::shape::{Segment, VoxelGrid};

/// Visits, in order, every voxel of `grid` crossed by the finite segment `start -> end`.
///
/// The segment is first clipped to the grid, so segments partially or totally outside
/// of it are accepted. For each crossed voxel, `visitor` receives the parameters of the
/// sub-segment inside of it and its length in mm. Crossings of zero length (a segment
/// grazing an edge or a corner) are never reported. Degenerate (zero-length or
/// non-finite) segments cross nothing.
///
/// # Example
///
/// ```
/// use voxtrace3d::math::Point;
/// use voxtrace3d::query::traverse_segment;
/// use voxtrace3d::shape::VoxelGrid;
///
/// let grid = VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
/// let mut total = 0.0;
/// traverse_segment(
///     &grid,
///     0,
///     &Point::new(-1.5, 0.5, 0.5),
///     &Point::new(1.5, 0.5, 0.5),
///     &mut |crossing| total += crossing.distance_mm,
/// );
/// assert!((total - 3.0).abs() < 1.0e-9);
/// ```
pub fn traverse_segment(
    grid: &VoxelGrid,
    ray_index: usize,
    start: &Point<Real>,
    end: &Point<Real>,
    visitor: &mut impl FnMut(VoxelCrossing),
) {
    let max_steps = grid.shape().iter().map(|s| *s as usize).sum::<usize>();
    traverse_segment_bounded(grid, ray_index, start, end, max_steps, visitor)
}

// Same as `traverse_segment`, but stops after `max_steps` moves from one voxel to the
// next. The crossings reported before stopping are kept.
pub(crate) fn traverse_segment_bounded(
    grid: &VoxelGrid,
    ray_index: usize,
    start: &Point<Real>,
    end: &Point<Real>,
    max_steps: usize,
    visitor: &mut impl FnMut(VoxelCrossing),
) {
    let segment = Segment::new(*start, *end);

    if segment.is_degenerate() {
        return;
    }

    let Some((t0, t1)) = grid.aabb().clip_segment_parameters(start, end) else {
        return;
    };

    let length = segment.length();
    let dir = segment.scaled_direction();
    let shape = grid.shape();
    let ii = [0, 1, 2];

    let first_voxel = grid.voxel_at_point_unchecked(&segment.point_at(t0));

    // A segment lying on a `maxs` face, parallel to it, has no voxel.
    if ii
        .iter()
        .any(|i| dir[*i] == 0.0 && (first_voxel[*i] < 0 || first_voxel[*i] >= shape[*i] as i32))
    {
        return;
    }

    let mut voxel_key = grid.clamp_voxel(first_voxel);
    let mut t_enter = t0;
    let mut steps = 0;

    loop {
        let aabb = grid.voxel_aabb(voxel_key);

        /*
         * Find the parameter where the segment leaves the current voxel.
         */
        let toi = ii.map(|i| {
            if dir[i] > 0.0 {
                ((aabb.maxs[i] - start[i]) / dir[i], true)
            } else if dir[i] < 0.0 {
                ((aabb.mins[i] - start[i]) / dir[i], false)
            } else {
                (Real::MAX, false)
            }
        });

        let imin = Vector::from(toi.map(|t| t.0)).imin();
        let t_exit = toi[imin].0.min(t1);

        if t_exit > t_enter {
            visitor(VoxelCrossing {
                ray_index,
                voxel: voxel_key,
                t_enter,
                t_exit,
                distance_mm: (t_exit - t_enter) * length,
            });
            t_enter = t_exit;
        }

        if toi[imin].0 >= t1 {
            break;
        }

        if toi[imin].1 {
            if voxel_key[imin] < shape[imin] as i32 - 1 {
                voxel_key[imin] += 1;
            } else {
                // Leaving the grid’s bounds.
                break;
            }
        } else if voxel_key[imin] > 0 {
            voxel_key[imin] -= 1;
        } else {
            // Leaving the grid’s bounds.
            break;
        }

        steps += 1;

        if steps > max_steps {
            log::debug!(
                "traversal of segment {} stopped after {} steps at voxel {:?}",
                ray_index,
                steps,
                voxel_key
            );
            break;
        }
    }
}

/// Collects the crossings of the segment `start -> end`, in traversal order.
pub fn segment_crossings(
    grid: &VoxelGrid,
    ray_index: usize,
    start: &Point<Real>,
    end: &Point<Real>,
) -> Vec<VoxelCrossing> {
    let mut crossings = Vec::new();
    traverse_segment(grid, ray_index, start, end, &mut |crossing| {
        crossings.push(crossing)
    });
    crossings
}
