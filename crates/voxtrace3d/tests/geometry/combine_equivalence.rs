use na::{Point3, Vector3};
use voxtrace3d::math::Real;
use voxtrace3d::shape::{SegmentBatch, VoxelGrid};
use voxtrace3d::voxelization::{voxelize, GridOutput, GridRequest, VoxelizationOptions};

fn grid() -> VoxelGrid {
    VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap()
}

fn plain(grid: &VoxelGrid, batch: &SegmentBatch, options: VoxelizationOptions) -> GridOutput {
    voxelize(grid, batch, &options)
        .unwrap()
        .as_plain()
        .unwrap()
        .clone()
}

// Exact duplicates of two rays, plus singletons: the worked example, a ray crossing a
// single voxel, and one starting outside of the grid.
fn duplicates_and_singletons() -> SegmentBatch {
    let diagonal = Vector3::new(0.3, 0.2, 1.0);
    SegmentBatch::new(
        vec![
            Point3::new(0.5, 0.5, -2.0),
            Point3::new(-2.0, 0.0, 0.0),
            Point3::new(-1.5, -1.5, -2.0),
            Point3::new(0.5, 0.5, -2.0),
            Point3::new(1.5, 0.5, 0.5),
            Point3::new(-1.5, -1.5, -2.0),
            Point3::new(-0.5, -5.0, 0.5),
        ],
        vec![
            Vector3::z(),
            Vector3::x(),
            diagonal,
            Vector3::z(),
            Vector3::x(),
            diagonal,
            Vector3::y(),
        ],
    )
    .with_weights(vec![0.25, 1.0, 0.5, 0.5, 2.0, 0.25, 1.0])
}

#[test]
fn combine_does_not_change_hit_grids() {
    let batch = duplicates_and_singletons();
    let request = GridRequest::default().distance(true);
    let separate = plain(&grid(), &batch, VoxelizationOptions::default().request(request));
    let combined = plain(
        &grid(),
        &batch,
        VoxelizationOptions::default().request(request).combine(true),
    );

    assert_eq!(combined.cumulative, separate.cumulative);
    assert_eq!(separate.cumulative.sum(), 4.0 * 0.75 + 4.0 + 6.0 * 0.75 + 2.0 + 4.0);
}

#[test]
fn combine_does_not_change_distance_grids() {
    let batch = duplicates_and_singletons();
    let request = GridRequest::default().use_distance(true).distance(true);
    let separate = plain(&grid(), &batch, VoxelizationOptions::default().request(request));
    let combined = plain(
        &grid(),
        &batch,
        VoxelizationOptions::default().request(request).combine(true),
    );

    let pairs = [
        (&combined.cumulative, &separate.cumulative),
        (
            combined.distance.as_ref().unwrap(),
            separate.distance.as_ref().unwrap(),
        ),
    ];

    for (a, b) in pairs {
        for (a, b) in a.data().iter().zip(b.data()) {
            assert_relative_eq!(*a, *b, epsilon = 1.0e-12, max_relative = 1.0e-12);
        }
    }
}

#[test]
fn combined_groups_keep_their_end_voxels() {
    // Hit on the `maxs` face, crossing the whole grid.
    let batch = SegmentBatch::new(vec![Point3::new(0.5, 0.5, 2.0)], vec![-Vector3::z()]);
    let combined = plain(&grid(), &batch, VoxelizationOptions::default().combine(true));
    assert_eq!(combined.cumulative.sum(), 4.0);

    // Both ends inside of the same voxel.
    let batch = SegmentBatch::new(vec![Point3::new(1.5, 0.5, 0.5)], vec![Vector3::x()]);
    let combined = plain(&grid(), &batch, VoxelizationOptions::default().combine(true));
    assert_eq!(combined.cumulative.sum(), 1.0);
    assert_eq!(combined.cumulative.get(Point3::new(3, 2, 2)), Some(1.0));
}

#[test]
fn combine_matches_separate_traversal_of_repeated_rays() {
    let mut rng = oorandom::Rand32::new(42);
    let grid = VoxelGrid::centered([32, 32, 32], [2420.0, 2420.0, 1000.0]).unwrap();
    let mut starts = Vec::new();
    let mut directions = Vec::new();

    for _ in 0..40 {
        let start = grid.mins()
            + Vector3::from_fn(|i, _| rng.rand_float() as Real * grid.dimensions()[i]);
        let direction = Vector3::from_fn(|_, _| rng.rand_float() as Real - 0.5);

        for _ in 0..rng.rand_range(1..4) {
            starts.push(start);
            directions.push(direction);
        }
    }

    let batch = SegmentBatch::new(starts, directions);
    let request = GridRequest::default().per_segment(true);
    let separate = plain(&grid, &batch, VoxelizationOptions::default().request(request));
    let combined = plain(
        &grid,
        &batch,
        VoxelizationOptions::default().request(request).combine(true),
    );

    assert_eq!(combined.cumulative, separate.cumulative);

    // Merged groups report their grids on their first member.
    let combined_per_segment = combined.per_segment.unwrap();
    let separate_per_segment = separate.per_segment.unwrap();
    assert_eq!(combined_per_segment.len(), batch.len());
    let total: Real = combined_per_segment.iter().map(|g| g.sum()).sum();
    let expected: Real = separate_per_segment.iter().map(|g| g.sum()).sum();
    assert_eq!(total, expected);
}
