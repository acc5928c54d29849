//! Definition of the segment shape and of segment batches.

use crate::math::{Point, Real, Vector};
use crate::shape::{GridError, Wall};

/// A finite segment between two points.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Segment {
    /// The segment first point.
    pub a: Point<Real>,
    /// The segment second point.
    pub b: Point<Real>,
}

impl Segment {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// The direction of this segment scaled by its length.
    ///
    /// Points from `self.a` toward `self.b`.
    #[inline]
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.b - self.a
    }

    /// The length of this segment.
    #[inline]
    pub fn length(&self) -> Real {
        self.scaled_direction().norm()
    }

    /// The point at parameter `t`, i.e., `a + (b - a) * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.a + self.scaled_direction() * t
    }

    /// Is this segment reduced to a point, or does it have non-finite coordinates?
    ///
    /// Degenerate segments cross no voxel.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let length = self.length();
        length == 0.0 || !length.is_finite()
    }
}

/// The range of accepted segment weights.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WeightDomain {
    /// Finite weights strictly greater than zero.
    #[default]
    Positive,
    /// Weights in `(0, 1]`, e.g., hit probabilities.
    UnitInterval,
}

impl WeightDomain {
    /// Does `weight` belong to this domain?
    #[inline]
    pub fn contains(self, weight: Real) -> bool {
        match self {
            WeightDomain::Positive => weight.is_finite() && weight > 0.0,
            WeightDomain::UnitInterval => weight > 0.0 && weight <= 1.0,
        }
    }
}

/// A batch of half-lines, each given by a start point and an extension direction.
///
/// Each entry describes a detector hit (`starts[i]`) and the reconstructed direction
/// (`directions[i]`) it is extended along. Weights default to `1.0`. Wall labels are
/// only needed by wall-aware builds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentBatch {
    /// The hit positions, in mm.
    pub starts: Vec<Point<Real>>,
    /// The extension directions. They do not need to be normalized.
    pub directions: Vec<Vector<Real>>,
    /// The per-segment weights, `1.0` for every segment if `None`.
    pub weights: Option<Vec<Real>>,
    /// The wall each hit was recorded on.
    pub walls: Option<Vec<Wall>>,
}

impl SegmentBatch {
    /// Creates a batch of unit-weight segments without wall labels.
    pub fn new(starts: Vec<Point<Real>>, directions: Vec<Vector<Real>>) -> Self {
        Self {
            starts,
            directions,
            weights: None,
            walls: None,
        }
    }

    /// Sets the per-segment weights.
    pub fn with_weights(mut self, weights: Vec<Real>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Sets the per-segment wall labels.
    pub fn with_walls(mut self, walls: Vec<Wall>) -> Self {
        self.walls = Some(walls);
        self
    }

    /// Sets the per-segment wall labels from their textual form (`"+x"`, `"-z"`, …).
    pub fn with_wall_labels<S: AsRef<str>>(mut self, labels: &[S]) -> Result<Self, GridError> {
        let walls = labels
            .iter()
            .map(|label| label.as_ref().parse())
            .collect::<Result<Vec<Wall>, _>>()?;
        self.walls = Some(walls);
        Ok(self)
    }

    /// The number of segments of this batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Does this batch contain no segment?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// The weight of the `i`-th segment.
    #[inline]
    pub fn weight(&self, i: usize) -> Real {
        self.weights.as_ref().map(|w| w[i]).unwrap_or(1.0)
    }

    /// The wall label of the `i`-th segment, if labels are set.
    #[inline]
    pub fn wall(&self, i: usize) -> Option<Wall> {
        self.walls.as_ref().map(|w| w[i])
    }

    /// The weights of all the segments, materialized.
    pub fn weights_or_ones(&self) -> Vec<Real> {
        self.weights
            .clone()
            .unwrap_or_else(|| vec![1.0; self.len()])
    }

    /// Checks that every array has the same length and that every weight lies in `domain`.
    pub fn validate(&self, domain: WeightDomain) -> Result<(), GridError> {
        let expected = self.starts.len();
        check_len("directions", expected, self.directions.len())?;

        if let Some(weights) = &self.weights {
            check_len("weights", expected, weights.len())?;

            if let Some((index, weight)) = weights
                .iter()
                .enumerate()
                .find(|(_, w)| !domain.contains(**w))
            {
                return Err(GridError::InvalidWeight {
                    index,
                    weight: *weight,
                });
            }
        }

        if let Some(walls) = &self.walls {
            check_len("walls", expected, walls.len())?;
        }

        Ok(())
    }

    /// The sub-batch made of the segments with the given indices.
    pub fn select(&self, indices: &[usize]) -> SegmentBatch {
        SegmentBatch {
            starts: indices.iter().map(|i| self.starts[*i]).collect(),
            directions: indices.iter().map(|i| self.directions[*i]).collect(),
            weights: self
                .weights
                .as_ref()
                .map(|w| indices.iter().map(|i| w[*i]).collect()),
            walls: self
                .walls
                .as_ref()
                .map(|w| indices.iter().map(|i| w[*i]).collect()),
        }
    }
}

pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), GridError> {
    if expected != found {
        Err(GridError::LengthMismatch {
            what,
            expected,
            found,
        })
    } else {
        Ok(())
    }
}
