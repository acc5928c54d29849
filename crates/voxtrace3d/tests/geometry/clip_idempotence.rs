use na::{Point3, Vector3};
use voxtrace3d::math::Real;
use voxtrace3d::query::clip_ray;
use voxtrace3d::shape::VoxelGrid;

#[test]
fn clipping_from_any_point_of_the_path_gives_the_same_exit() {
    let mut rng = oorandom::Rand32::new(42);
    let grid = VoxelGrid::centered([10, 10, 10], [2420.0, 2420.0, 1000.0]).unwrap();
    let eps = 1.0e-6;

    for _ in 0..1000 {
        let start = grid.mins()
            + Vector3::from_fn(|i, _| rng.rand_float() as Real * grid.dimensions()[i]);
        let direction = Vector3::from_fn(|_, _| rng.rand_float() as Real - 0.5);
        let Some(end) = clip_ray(&grid, &start, &direction, eps) else {
            continue;
        };

        assert!(grid.aabb().contains_local_point_half_open(&end));

        let t = rng.rand_float() as Real;
        let midpoint = start + (end - start) * t;
        let again = clip_ray(&grid, &midpoint, &direction, eps).unwrap();
        assert_relative_eq!(again, end, epsilon = 1.0e-5);
    }
}

#[test]
fn rays_pointing_away_are_dropped() {
    let grid = VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
    assert!(clip_ray(&grid, &Point3::new(5.0, 0.0, 0.0), &Vector3::x(), 1.0e-6).is_none());
    assert!(clip_ray(&grid, &Point3::origin(), &Vector3::zeros(), 1.0e-6).is_none());
    assert!(clip_ray(&grid, &Point3::new(5.0, 0.0, 0.0), &-Vector3::x(), 1.0e-6).is_some());
}

#[test]
fn segments_strictly_inside_are_left_untouched() {
    let mut rng = oorandom::Rand32::new(42);
    let grid = VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
    let aabb = grid.aabb();

    for _ in 0..100 {
        let a = Point3::from(Vector3::from_fn(|_, _| rng.rand_float() as Real * 3.8 - 1.9));
        let b = Point3::from(Vector3::from_fn(|_, _| rng.rand_float() as Real * 3.8 - 1.9));
        let clipped = aabb.clip_segment(&a, &b).unwrap();
        assert_eq!(clipped.a, a);
        assert_relative_eq!(clipped.b, b, epsilon = 1.0e-12);
    }
}
