use na::{Point3, Vector3};
use voxtrace3d::shape::{GridError, SegmentBatch, VoxelGrid, WeightDomain};
use voxtrace3d::voxelization::{voxelize, VoxelizationOptions, WallMode};

fn grid() -> VoxelGrid {
    VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap()
}

#[test]
fn invalid_grids_are_rejected() {
    assert_eq!(
        VoxelGrid::centered([0, 4, 4], [4.0, 4.0, 4.0]),
        Err(GridError::InvalidShape([0, 4, 4]))
    );
    assert_eq!(
        VoxelGrid::centered([4, 4, 4], [4.0, -1.0, 4.0]),
        Err(GridError::InvalidDimensions([4.0, -1.0, 4.0]))
    );
    assert!(matches!(
        VoxelGrid::new(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 1.0), [4, 4, 4]),
        Err(GridError::InvalidBounds { .. })
    ));
}

#[test]
fn mismatched_batches_are_rejected() {
    let batch = SegmentBatch::new(
        vec![Point3::origin(), Point3::origin()],
        vec![Vector3::x()],
    );
    assert_eq!(
        voxelize(&grid(), &batch, &VoxelizationOptions::default()),
        Err(GridError::LengthMismatch {
            what: "directions",
            expected: 2,
            found: 1
        })
    );

    let batch = SegmentBatch::new(vec![Point3::origin()], vec![Vector3::x()])
        .with_weights(vec![1.0, 1.0]);
    assert!(matches!(
        voxelize(&grid(), &batch, &VoxelizationOptions::default()),
        Err(GridError::LengthMismatch { what: "weights", .. })
    ));
}

#[test]
fn weights_outside_of_the_domain_are_rejected() {
    let batch = SegmentBatch::new(vec![Point3::origin()], vec![Vector3::x()])
        .with_weights(vec![0.0]);
    assert_eq!(
        voxelize(&grid(), &batch, &VoxelizationOptions::default()),
        Err(GridError::InvalidWeight {
            index: 0,
            weight: 0.0
        })
    );

    let batch = batch.with_weights(vec![1.0]);
    let options = VoxelizationOptions::default().weight_domain(WeightDomain::UnitInterval);
    assert!(voxelize(&grid(), &batch, &options).is_ok());
}

#[test]
fn wall_modes_need_labels() {
    let batch = SegmentBatch::new(vec![Point3::origin()], vec![Vector3::x()]);
    for mode in [WallMode::Stack, WallMode::Fold, WallMode::FoldKeepWalls] {
        let options = VoxelizationOptions::default().walls(mode);
        assert_eq!(
            voxelize(&grid(), &batch, &options),
            Err(GridError::MissingWalls)
        );
    }

    assert_eq!(
        batch.clone().with_wall_labels(&["+w"]).err(),
        Some(GridError::UnknownWall("+w".to_string()))
    );
}
