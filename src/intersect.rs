// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersections of Bezier curves with lines, circles, other curves and
//! themselves.

use alloc::collections::VecDeque;

use arrayvec::ArrayVec;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::bezier::power_basis;
use crate::common::{solve_cubic_in_unit, solve_poly_between, PolyCoeffs, MAX_POLY_DEGREE};
use crate::{
    BezierCurve, Circle, CurveOpts, Degree, Line, ParamCurveArclen, ParamCurveNearest, Point,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Parameter distance from the split point within which a hit between the
/// two halves of a curve is the shared split point itself.
const SPLIT_POINT_WINDOW: f64 = 1e-3;

/// Parameter accuracy of circle intersections.
const CIRCLE_ACCURACY: f64 = 1e-12;

/// An intersection between two curves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveIntersection {
    /// Parameter on the curve the query was made on.
    pub self_t: f64,
    /// Parameter on the other curve.
    pub other_t: f64,
}

/// An intersection between a curve and a line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineIntersection {
    /// Parameter on the curve.
    pub curve_t: f64,
    /// Parameter on the line segment.
    pub line_t: f64,
    /// The curve point at `curve_t`.
    pub point: Point,
}

/// An intersection between a curve and a circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleIntersection {
    /// Parameter on the curve.
    pub t: f64,
    /// The curve point at `t`.
    pub point: Point,
}

/// A pair of sub-curves awaiting examination, with the parameter ranges
/// they cover on the original curves.
struct Candidate {
    a: BezierCurve,
    a_range: (f64, f64),
    b: BezierCurve,
    b_range: (f64, f64),
}

fn midpoint(range: (f64, f64)) -> f64 {
    0.5 * (range.0 + range.1)
}

impl BezierCurve {
    /// Intersections with a finite line segment.
    ///
    /// The curve is moved so that the line lies on the +x axis, and the
    /// roots of its y polynomial in `[0, 1]` are taken as candidates. A
    /// candidate is kept when its point lies within the segment. The result
    /// is sorted by `curve_t`.
    ///
    /// A curve lying along the line has no isolated crossings and yields
    /// nothing.
    pub fn line_intersections(&self, line: Line) -> ArrayVec<LineIntersection, 3> {
        let transform = line.x_axis_transform();
        let aligned = transform * self.clone();
        let mut c = [0.0; 4];
        for (slot, v) in c.iter_mut().zip(power_basis(aligned.points())) {
            *slot = v.y;
        }
        solve_cubic_in_unit(c[0], c[1], c[2], c[3])
            .into_iter()
            .filter_map(|curve_t| {
                let point = self.eval_unchecked(curve_t);
                line.contains(point).then(|| LineIntersection {
                    curve_t,
                    line_t: line.nearest(point).t,
                    point,
                })
            })
            .collect()
    }

    /// Intersections with another curve, using [`CurveOpts::default`].
    pub fn curve_intersections(&self, other: &BezierCurve) -> SmallVec<[CurveIntersection; 9]> {
        self.curve_intersections_with(other, &CurveOpts::default())
    }

    /// Intersections with another curve.
    ///
    /// Pairs of sub-curves are bisected breadth first. A pair is dropped as
    /// soon as the bounding boxes are disjoint, and reported as a hit at
    /// the middle of both parameter ranges once both sub-curves are shorter
    /// than [`CurveOpts::length_tolerance`]. A hit is dropped when its
    /// `self_t` lies within [`CurveOpts::dedup_epsilon`] of an earlier hit,
    /// or when both of its parameters lie within the converged sub-range
    /// widths of an earlier hit, as happens for a crossing on a bisection
    /// boundary. The result is sorted by `self_t`.
    ///
    /// At most [`CurveOpts::max_pairs`] pairs are examined; overlapping
    /// curves reach this limit and report whatever was found until then.
    pub fn curve_intersections_with(
        &self,
        other: &BezierCurve,
        opts: &CurveOpts,
    ) -> SmallVec<[CurveIntersection; 9]> {
        let mut queue = VecDeque::new();
        queue.push_back(Candidate {
            a: self.clone(),
            a_range: (0.0, 1.0),
            b: other.clone(),
            b_range: (0.0, 1.0),
        });
        // Hits with the widths of the sub-ranges they converged in.
        let mut found: SmallVec<[(CurveIntersection, f64, f64); 9]> = SmallVec::new();
        let mut examined = 0;
        while let Some(pair) = queue.pop_front() {
            if examined >= opts.max_pairs {
                warn!(
                    max_pairs = opts.max_pairs,
                    pending = queue.len() + 1,
                    "intersection search stopped at its work limit"
                );
                break;
            }
            examined += 1;
            if !pair.a.bounding_box().overlaps(&pair.b.bounding_box()) {
                continue;
            }
            if pair.a.arclen() < opts.length_tolerance && pair.b.arclen() < opts.length_tolerance {
                let hit = CurveIntersection {
                    self_t: midpoint(pair.a_range),
                    other_t: midpoint(pair.b_range),
                };
                let a_width = pair.a_range.1 - pair.a_range.0;
                let b_width = pair.b_range.1 - pair.b_range.0;
                let duplicate = found.iter().any(|(kept, kept_a, kept_b)| {
                    let ds = (kept.self_t - hit.self_t).abs();
                    let d_other = (kept.other_t - hit.other_t).abs();
                    ds < opts.dedup_epsilon
                        || (ds <= kept_a.max(a_width) && d_other <= kept_b.max(b_width))
                });
                if !duplicate {
                    found.push((hit, a_width, b_width));
                }
                continue;
            }
            let (a0, a1) = pair.a.split_unchecked(0.5);
            let (b0, b1) = pair.b.split_unchecked(0.5);
            let am = midpoint(pair.a_range);
            let bm = midpoint(pair.b_range);
            for (a, a_range) in [(&a0, (pair.a_range.0, am)), (&a1, (am, pair.a_range.1))] {
                for (b, b_range) in [(&b0, (pair.b_range.0, bm)), (&b1, (bm, pair.b_range.1))] {
                    queue.push_back(Candidate {
                        a: a.clone(),
                        a_range,
                        b: b.clone(),
                        b_range,
                    });
                }
            }
        }
        let mut hits: SmallVec<[CurveIntersection; 9]> =
            found.into_iter().map(|(hit, _, _)| hit).collect();
        hits.sort_unstable_by(|x, y| x.self_t.total_cmp(&y.self_t));
        debug!(examined, hits = hits.len(), "curve intersection search done");
        hits
    }

    /// Points where the curve crosses itself, using [`CurveOpts::default`].
    pub fn self_intersections(&self) -> SmallVec<[CurveIntersection; 9]> {
        self.self_intersections_with(&CurveOpts::default())
    }

    /// Points where the curve crosses itself.
    ///
    /// Only cubic curves can cross themselves; other degrees yield nothing.
    /// The curve is split at `t = 0.5` and the halves are intersected. The
    /// shared split point is not reported. In every result
    /// `self_t < 0.5 <= other_t`, both on this curve.
    pub fn self_intersections_with(&self, opts: &CurveOpts) -> SmallVec<[CurveIntersection; 9]> {
        if self.degree() != Degree::Cubic {
            return SmallVec::new();
        }
        let (left, right) = self.split_unchecked(0.5);
        left.curve_intersections_with(&right, opts)
            .into_iter()
            .filter(|hit| {
                !(hit.self_t > 1.0 - SPLIT_POINT_WINDOW && hit.other_t < SPLIT_POINT_WINDOW)
            })
            .map(|hit| CurveIntersection {
                self_t: hit.self_t * 0.5,
                other_t: hit.other_t * 0.5 + 0.5,
            })
            .collect()
    }

    /// Intersections with a circle.
    ///
    /// The squared distance from the center minus the squared radius is a
    /// polynomial in `t` of twice the curve's degree. Its roots in `[0, 1]`
    /// are isolated between the critical points and refined to within
    /// 1e-12, so crossings are found however small the circle is. A tangential contact is reported only when the distance
    /// matches the radius exactly. The result is sorted by `t`; a negative
    /// or NaN radius yields nothing.
    pub fn circle_intersections(&self, circle: Circle) -> SmallVec<[CircleIntersection; 6]> {
        if circle.radius.is_nan() || circle.radius < 0.0 {
            return SmallVec::new();
        }
        let mut coeffs = power_basis(self.points());
        if let Some(c0) = coeffs.first_mut() {
            *c0 -= circle.center.to_vec2();
        }
        let mut f: PolyCoeffs = [0.0; MAX_POLY_DEGREE + 1];
        for (i, a) in coeffs.iter().enumerate() {
            for (j, b) in coeffs.iter().enumerate() {
                f[i + j] += a.dot(*b);
            }
        }
        f[0] -= circle.radius * circle.radius;
        solve_poly_between(&f, 0.0, 1.0, CIRCLE_ACCURACY)
            .into_iter()
            .map(|t| CircleIntersection {
                t,
                point: self.eval_unchecked(t),
            })
            .collect()
    }
}
