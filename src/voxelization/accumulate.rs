use crate::math::Real;
use crate::query::VoxelCrossing;
use crate::voxelization::DenseGrid;

/// The set of grids an accumulation should produce.
///
/// The cumulative grid is always produced. Each flag adds one product to the
/// resulting [`GridOutput`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GridRequest {
    /// Multiply each segment weight by the distance traveled inside each voxel.
    ///
    /// If `false`, every voxel crossed by a segment receives its full weight.
    pub use_distance: bool,
    /// Also produce one grid per segment.
    pub per_segment: bool,
    /// Also produce the pure-distance grid(s), ignoring weights.
    pub distance: bool,
}

impl GridRequest {
    /// Sets whether segment weights are multiplied by the traveled distance.
    pub fn use_distance(mut self, use_distance: bool) -> Self {
        self.use_distance = use_distance;
        self
    }

    /// Sets whether one grid per segment is produced.
    pub fn per_segment(mut self, per_segment: bool) -> Self {
        self.per_segment = per_segment;
        self
    }

    /// Sets whether pure-distance grids are produced.
    pub fn distance(mut self, distance: bool) -> Self {
        self.distance = distance;
        self
    }
}

/// The grids produced by an accumulation, as selected by a [`GridRequest`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct GridOutput {
    /// The weighted sum over all segments.
    pub cumulative: DenseGrid,
    /// One weighted grid per segment, if requested.
    pub per_segment: Option<Vec<DenseGrid>>,
    /// The sum of the distances traveled inside each voxel, if requested.
    pub distance: Option<DenseGrid>,
    /// One distance grid per segment, if both per-segment and distance grids are requested.
    pub per_segment_distance: Option<Vec<DenseGrid>>,
}

impl GridOutput {
    /// The zero-filled products selected by `request` for `num_segments` segments.
    pub fn zeros(shape: [u32; 3], num_segments: usize, request: &GridRequest) -> Self {
        let per_segment_zeros = || vec![DenseGrid::zeros(shape); num_segments];
        Self {
            cumulative: DenseGrid::zeros(shape),
            per_segment: request.per_segment.then(per_segment_zeros),
            distance: request.distance.then(|| DenseGrid::zeros(shape)),
            per_segment_distance: (request.per_segment && request.distance)
                .then(per_segment_zeros),
        }
    }

    /// Adds every product of `other` to the corresponding product of `self`.
    ///
    /// Products missing from `self` are copied from `other`. Per-segment grids are
    /// matched by index.
    pub fn merge(&mut self, other: &GridOutput) {
        self.cumulative.add_grid(&other.cumulative);
        merge_grid(&mut self.distance, &other.distance);
        merge_grids(&mut self.per_segment, &other.per_segment);
        merge_grids(&mut self.per_segment_distance, &other.per_segment_distance);
    }
}

fn merge_grid(dst: &mut Option<DenseGrid>, src: &Option<DenseGrid>) {
    if let Some(src) = src {
        match dst {
            Some(dst) => dst.add_grid(src),
            None => *dst = Some(src.clone()),
        }
    }
}

fn merge_grids(dst: &mut Option<Vec<DenseGrid>>, src: &Option<Vec<DenseGrid>>) {
    if let Some(src) = src {
        match dst {
            Some(dst) => {
                for (a, b) in dst.iter_mut().zip(src.iter()) {
                    a.add_grid(b);
                }
                if src.len() > dst.len() {
                    let len = dst.len();
                    dst.extend_from_slice(&src[len..]);
                }
            }
            None => *dst = Some(src.clone()),
        }
    }
}

/// Accumulates voxel crossings into dense grids.
///
/// `weights[i]` is the weight of the segment with `ray_index == i`, and the number of
/// per-segment grids is `weights.len()`. Crossings referring to a segment without weight
/// are ignored. Requested products are returned zero-filled when `crossings` is empty.
pub fn accumulate(
    shape: [u32; 3],
    crossings: &[VoxelCrossing],
    weights: &[Real],
    request: &GridRequest,
) -> GridOutput {
    let mut output = GridOutput::zeros(shape, weights.len(), request);

    for crossing in crossings {
        let Some(weight) = weights.get(crossing.ray_index) else {
            continue;
        };

        let value = if request.use_distance {
            weight * crossing.distance_mm
        } else {
            *weight
        };

        output.cumulative.add(crossing.voxel, value);

        if let Some(grids) = &mut output.per_segment {
            grids[crossing.ray_index].add(crossing.voxel, value);
        }

        if let Some(grid) = &mut output.distance {
            grid.add(crossing.voxel, crossing.distance_mm);
        }

        if let Some(grids) = &mut output.per_segment_distance {
            grids[crossing.ray_index].add(crossing.voxel, crossing.distance_mm);
        }
    }

    output
}
