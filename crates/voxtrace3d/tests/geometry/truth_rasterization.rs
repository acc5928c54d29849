use na::Point3;
use voxtrace3d::math::Real;
use voxtrace3d::shape::VoxelGrid;
use voxtrace3d::voxelization::rasterize_truth;

#[test]
fn every_point_is_either_counted_or_dropped() {
    let mut rng = oorandom::Rand32::new(42);
    let grid = VoxelGrid::centered([12, 12, 5], [2420.0, 2420.0, 1000.0]).unwrap();
    let points: Vec<_> = (0..2000)
        .map(|_| {
            // Roughly a quarter of the points fall outside of the grid.
            Point3::new(
                (rng.rand_float() as Real - 0.5) * 2420.0 * 1.1,
                (rng.rand_float() as Real - 0.5) * 2420.0 * 1.1,
                (rng.rand_float() as Real - 0.5) * 1000.0 * 1.1,
            )
        })
        .collect();

    let truth = rasterize_truth(&grid, &points);
    let outside = points
        .iter()
        .filter(|p| !grid.aabb().contains_local_point_half_open(p))
        .count();

    assert!(outside > 0);
    assert_eq!(truth.dropped, outside);
    assert_eq!(truth.grid.sum() as usize + truth.dropped, points.len());
}

#[test]
fn upper_faces_are_outside() {
    let grid = VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
    let truth = rasterize_truth(
        &grid,
        &[
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(1.999, 1.999, 1.999),
        ],
    );
    assert_eq!(truth.dropped, 2);
    assert_eq!(truth.grid.get(Point3::new(3, 3, 3)), Some(1.0));
}
