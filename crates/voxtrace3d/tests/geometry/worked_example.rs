use na::{Point3, Vector3};
use voxtrace3d::query::{clip_ray, segment_crossings};
use voxtrace3d::shape::VoxelGrid;

#[test]
fn axis_aligned_ray_through_a_millimeter_grid() {
    let grid = VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
    let start = Point3::new(-2.0, 0.0, 0.0);
    let end = clip_ray(&grid, &start, &Vector3::x(), 1.0e-6).unwrap();
    assert_relative_eq!(end, Point3::new(2.0 - 1.0e-6, 0.0, 0.0));

    let crossings = segment_crossings(&grid, 0, &start, &end);
    assert_eq!(crossings.len(), 4);

    for (x, crossing) in crossings.iter().enumerate() {
        assert_eq!(crossing.voxel, Point3::new(x as i32, 2, 2));
        assert_relative_eq!(crossing.distance_mm, 1.0, epsilon = 1.0e-5);
    }

    let total: f64 = crossings.iter().map(|c| c.distance_mm).sum();
    assert_relative_eq!(total, 4.0, epsilon = 1.0e-5);
}
