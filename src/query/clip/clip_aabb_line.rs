use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};
use crate::shape::Segment;
use num::{Bounded, Zero};

impl Aabb {
    /// Computes the parameters of the two intersection points between a line and this AABB.
    ///
    /// The parameters are such that the point are given by `orig + dir * parameter`.
    /// Returns `None` if there is no intersection.
    #[inline]
    pub fn clip_line_parameters(
        &self,
        orig: &Point<Real>,
        dir: &Vector<Real>,
    ) -> Option<(Real, Real)> {
        clip_aabb_line(self, orig, dir)
    }

    /// Computes the parameters of the two intersection points between a ray and this AABB.
    ///
    /// Only the part of the line with non-negative parameters is kept.
    /// Returns `None` if the ray does not hit this AABB.
    #[inline]
    pub fn clip_ray_parameters(
        &self,
        orig: &Point<Real>,
        dir: &Vector<Real>,
    ) -> Option<(Real, Real)> {
        self.clip_line_parameters(orig, dir).and_then(|(t0, t1)| {
            if t1 < 0.0 {
                None
            } else {
                Some((t0.max(0.0), t1))
            }
        })
    }

    /// Computes the sub-interval `[t0, t1]` of `[0, 1]` of the segment `a -> b` lying inside
    /// of this AABB.
    ///
    /// Returns `None` if the segment misses the AABB or only grazes it, i.e., if the
    /// resulting interval would be empty or reduced to a single point.
    #[inline]
    pub fn clip_segment_parameters(
        &self,
        a: &Point<Real>,
        b: &Point<Real>,
    ) -> Option<(Real, Real)> {
        let ab = b - a;
        self.clip_line_parameters(a, &ab).and_then(|(t0, t1)| {
            let t0 = t0.max(0.0);
            let t1 = t1.min(1.0);

            if t1 > t0 {
                Some((t0, t1))
            } else {
                None
            }
        })
    }

    /// Computes the intersection of a segment with this AABB.
    ///
    /// Returns `None` if there is no intersection.
    #[inline]
    pub fn clip_segment(&self, a: &Point<Real>, b: &Point<Real>) -> Option<Segment> {
        let ab = b - a;
        self.clip_segment_parameters(a, b)
            .map(|(t0, t1)| Segment::new(a + ab * t0, a + ab * t1))
    }
}

/// Computes the parameters of the intersection between a line and an AABB.
///
/// The line is `origin + dir * t` for every real `t`. An axis along which `dir`
/// is zero constrains nothing if `origin` lies within that slab, and makes the
/// line miss the box otherwise.
pub fn clip_aabb_line(aabb: &Aabb, origin: &Point<Real>, dir: &Vector<Real>) -> Option<(Real, Real)> {
    let mut tmax: Real = Bounded::max_value();
    let mut tmin: Real = -tmax;

    for i in 0usize..DIM {
        if dir[i].is_zero() {
            if origin[i] < aabb.mins[i] || origin[i] > aabb.maxs[i] {
                return None;
            }
        } else {
            let denom = 1.0 / dir[i];
            let mut inter_with_near_halfspace = (aabb.mins[i] - origin[i]) * denom;
            let mut inter_with_far_halfspace = (aabb.maxs[i] - origin[i]) * denom;

            if inter_with_near_halfspace > inter_with_far_halfspace {
                core::mem::swap(
                    &mut inter_with_near_halfspace,
                    &mut inter_with_far_halfspace,
                )
            }

            tmin = tmin.max(inter_with_near_halfspace);
            tmax = tmax.min(inter_with_far_halfspace);

            if tmin > tmax {
                return None;
            }
        }
    }

    Some((tmin, tmax))
}
