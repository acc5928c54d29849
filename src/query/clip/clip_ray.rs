use crate::math::{Point, Real, Vector};
use crate::shape::{check_len, GridError, VoxelGrid};

/// Computes the point where the half-line `start + t * direction`, `t ≥ 0`, leaves the grid.
///
/// Every component of the result lying on (or beyond) a `maxs` face of the grid is moved
/// `epsilon` inward, so the returned point always has a voxel. Returns `None` if the
/// direction is zero, if any input is not finite, or if the half-line misses the grid
/// (including the case where it only grazes it).
///
/// # Example
///
/// ```
/// use voxtrace3d::math::{Point, Vector};
/// use voxtrace3d::query::clip_ray;
/// use voxtrace3d::shape::VoxelGrid;
///
/// let grid = VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
/// let end = clip_ray(&grid, &Point::new(-2.0, 0.0, 0.0), &Vector::x(), 1.0e-6).unwrap();
/// assert!((end.x - (2.0 - 1.0e-6)).abs() < 1.0e-12);
/// ```
pub fn clip_ray(
    grid: &VoxelGrid,
    start: &Point<Real>,
    direction: &Vector<Real>,
    epsilon: Real,
) -> Option<Point<Real>> {
    let finite = start.iter().chain(direction.iter()).all(|x| x.is_finite());

    if !finite || direction.iter().all(|x| *x == 0.0) {
        return None;
    }

    let aabb = grid.aabb();
    let (t_enter, t_exit) = aabb.clip_ray_parameters(start, direction)?;

    if t_exit <= 0.0 || t_exit <= t_enter {
        return None;
    }

    let end = start + direction * t_exit;
    Some(aabb.nudge_inside(&end, epsilon))
}

/// Computes the grid exit point of every `(start, direction)` half-line.
///
/// The `i`-th output is the result of [`clip_ray`] on the `i`-th input pair. Fails with
/// [`GridError::LengthMismatch`] if both arrays have different lengths.
pub fn clip_rays(
    grid: &VoxelGrid,
    starts: &[Point<Real>],
    directions: &[Vector<Real>],
    epsilon: Real,
) -> Result<Vec<Option<Point<Real>>>, GridError> {
    check_len("directions", starts.len(), directions.len())?;

    let ends: Vec<_> = starts
        .iter()
        .zip(directions.iter())
        .map(|(start, dir)| clip_ray(grid, start, dir, epsilon))
        .collect();

    let missed = ends.iter().filter(|end| end.is_none()).count();
    if missed > 0 {
        log::debug!("{} of {} rays miss the grid", missed, ends.len());
    }

    Ok(ends)
}
