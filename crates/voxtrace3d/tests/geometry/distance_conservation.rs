use na::{Point3, Vector3};
use voxtrace3d::math::Real;
use voxtrace3d::query::{clip_rays, voxel_crossings};
use voxtrace3d::shape::{SegmentBatch, VoxelGrid};
use voxtrace3d::voxelization::{voxelize, GridRequest, VoxelizationOptions};

fn random_rays(
    rng: &mut oorandom::Rand32,
    grid: &VoxelGrid,
    count: usize,
) -> (Vec<Point3<Real>>, Vec<Vector3<Real>>) {
    let mins = grid.mins();
    let extents = grid.dimensions();
    let mut starts = Vec::with_capacity(count);
    let mut directions = Vec::with_capacity(count);

    for _ in 0..count {
        let start = mins + Vector3::from_fn(|i, _| rng.rand_float() as Real * extents[i]);
        let direction = Vector3::from_fn(|_, _| rng.rand_float() as Real - 0.5);
        starts.push(start);
        directions.push(direction);
    }

    (starts, directions)
}

#[test]
fn accumulated_distance_equals_clipped_length() {
    let mut rng = oorandom::Rand32::new(42);
    let grid = VoxelGrid::centered([17, 9, 23], [2420.0, 2420.0, 1000.0]).unwrap();
    let (starts, directions) = random_rays(&mut rng, &grid, 500);

    let ends = clip_rays(&grid, &starts, &directions, 1.0e-6).unwrap();
    let expected: Real = starts
        .iter()
        .zip(&ends)
        .filter_map(|(s, e)| e.map(|e| (e - s).norm()))
        .sum();

    let batch = SegmentBatch::new(starts, directions);
    let options = VoxelizationOptions::default()
        .request(GridRequest::default().use_distance(true).distance(true));
    let result = voxelize(&grid, &batch, &options).unwrap();
    let output = result.as_plain().unwrap();

    assert_relative_eq!(output.cumulative.sum(), expected, max_relative = 1.0e-9);
    assert_relative_eq!(
        output.distance.as_ref().unwrap().sum(),
        expected,
        max_relative = 1.0e-9
    );
}

#[test]
fn crossings_chain_along_each_segment() {
    let mut rng = oorandom::Rand32::new(42);
    let grid = VoxelGrid::centered([8, 8, 8], [16.0, 8.0, 4.0]).unwrap();
    let (starts, directions) = random_rays(&mut rng, &grid, 200);
    let ends: Vec<_> = clip_rays(&grid, &starts, &directions, 1.0e-6)
        .unwrap()
        .into_iter()
        .zip(&starts)
        .map(|(e, s)| e.unwrap_or(*s))
        .collect();

    let crossings = voxel_crossings(&grid, &starts, &ends).unwrap();
    let diagonal = grid.voxel_size().norm();

    for pair in crossings.windows(2) {
        if pair[0].ray_index == pair[1].ray_index {
            assert_relative_eq!(pair[0].t_exit, pair[1].t_enter);
            assert_ne!(pair[0].voxel, pair[1].voxel);
        }
    }

    for crossing in &crossings {
        assert!(crossing.t_exit > crossing.t_enter);
        assert!(crossing.distance_mm > 0.0);
        assert!(crossing.distance_mm <= diagonal + 1.0e-9);
    }

    for (i, (s, e)) in starts.iter().zip(&ends).enumerate() {
        let total: Real = crossings
            .iter()
            .filter(|c| c.ray_index == i)
            .map(|c| c.distance_mm)
            .sum();
        assert_relative_eq!(total, (e - s).norm(), epsilon = 1.0e-9);
    }
}

#[test]
fn segment_inside_a_single_voxel() {
    let grid = VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
    let start = Point3::new(0.1, 0.2, 0.3);
    let end = Point3::new(0.8, 0.6, 0.4);
    let crossings = voxel_crossings(&grid, &[start], &[end]).unwrap();

    assert_eq!(crossings.len(), 1);
    assert_eq!(crossings[0].voxel, Point3::new(2, 2, 2));
    assert_eq!(crossings[0].t_enter, 0.0);
    assert_eq!(crossings[0].t_exit, 1.0);
    assert_relative_eq!(crossings[0].distance_mm, (end - start).norm());
}
