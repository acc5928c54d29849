/*!
voxtrace3d
==========

**voxtrace3d** turns sets of 3D line segments (detector hits extended along
their reconstructed directions) into dense voxel grids usable as machine-learning
tensors.

The crate is organized leaf-first:

- [`bounding_volume`]: the axis-aligned box enclosing the detector.
- [`shape`]: the voxel grid geometry, segments and detector walls.
- [`query`]: slab clipping and the exact voxel traversal engine.
- [`voxelization`]: accumulation policies, segment deduplication, wall-aware
  combination, truth rasterization, sparse voxel paths and empty-voxel filling.

```
use voxtrace3d::math::{Point, Vector};
use voxtrace3d::shape::{SegmentBatch, VoxelGrid};
use voxtrace3d::voxelization::{voxelize, VoxelizationOptions};

let grid = VoxelGrid::centered([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
let batch = SegmentBatch::new(
    vec![Point::new(-2.0, 0.0, 0.0)],
    vec![Vector::new(1.0, 0.0, 0.0)],
);
let result = voxelize(&grid, &batch, &VoxelizationOptions::default()).unwrap();
let cumulative = result.as_plain().unwrap().cumulative.clone();
assert_eq!(cumulative.sum(), 4.0);
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![deny(unused_qualifications)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod math;
pub mod query;
pub mod shape;
pub mod utils;
pub mod voxelization;
