use na::{Point3, Vector3};
use voxtrace3d::shape::{SegmentBatch, VoxelGrid, Wall};
use voxtrace3d::voxelization::{voxelize, GridRequest, VoxelizationOptions, WallMode};

fn grid() -> VoxelGrid {
    VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap()
}

// Three tracks meeting at voxel (2, 2, 2): along x from both x walls, and along z from
// the bottom wall.
fn batch() -> SegmentBatch {
    SegmentBatch::new(
        vec![
            Point3::new(-2.0, 0.5, 0.5),
            Point3::new(2.0, 0.5, 0.5),
            Point3::new(0.5, 0.5, -2.0),
        ],
        vec![Vector3::x(), -Vector3::x(), Vector3::z()],
    )
    .with_wall_labels(&["-x", "+x", "-z"])
    .unwrap()
}

#[test]
fn opposite_pair_plus_a_third_wall_is_kept() {
    let options = VoxelizationOptions::default()
        .walls(WallMode::Fold)
        .request(GridRequest::default().per_segment(true));
    let result = voxelize(&grid(), &batch(), &options).unwrap();
    let folded = result.as_folded().unwrap();

    let center = Point3::new(2, 2, 2);
    assert_eq!(folded.cumulative.get(center), Some(3.0));
    // Voxels seen by the x pair only, or by the z wall only, are dropped.
    assert_eq!(folded.cumulative.count_nonzero(), 1);

    let per_segment = folded.per_segment.as_ref().unwrap();
    assert_eq!(per_segment.len(), 3);
    for grid in per_segment {
        assert_eq!(grid.sum(), 4.0);
    }
}

#[test]
fn stacked_channels_follow_wall_indices() {
    let options = VoxelizationOptions::default().walls(WallMode::Stack);
    let result = voxelize(&grid(), &batch(), &options).unwrap();
    let stack = result.as_stacked().unwrap();

    let walls: Vec<_> = stack.walls.iter().map(|w| w.wall).collect();
    assert_eq!(walls, vec![Wall::XPos, Wall::XNeg, Wall::ZNeg]);
    for wall in [Wall::XPos, Wall::XNeg, Wall::ZNeg] {
        assert_eq!(stack.stacked.channel(wall.index()).unwrap().sum(), 4.0);
    }
    for wall in [Wall::YPos, Wall::YNeg, Wall::ZPos] {
        assert_eq!(stack.stacked.channel(wall.index()).unwrap().sum(), 0.0);
    }

    let channels_first = stack.stacked.channels_first();
    let num_voxels = 64;
    let z_neg: f64 = channels_first[Wall::ZNeg.index() * num_voxels..][..num_voxels]
        .iter()
        .sum();
    assert_eq!(z_neg, 4.0);
}

#[test]
fn ignoring_walls_sums_every_track() {
    let result = voxelize(&grid(), &batch(), &VoxelizationOptions::default()).unwrap();
    let output = result.as_plain().unwrap();
    assert_eq!(output.cumulative.sum(), 12.0);
    assert_eq!(output.cumulative.get(Point3::new(2, 2, 2)), Some(3.0));
}
