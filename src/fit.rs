// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Approximation of a curve by a chain of circular arcs.

use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::{Arc, BezierCurve, Circle, Point};

/// Bound on the fit attempts for a single arc.
const MAX_FIT_ATTEMPTS: usize = 200;

/// The circle through `start`, `mid` and `end`.
///
/// Returns `None` when the points are collinear. See
/// [`Circle::through_points`].
#[inline]
pub fn fit_arc(start: Point, end: Point, mid: Point) -> Option<Circle> {
    Circle::through_points(start, mid, end)
}

impl BezierCurve {
    /// The longest arc starting at `low` that stays within `error` of the
    /// curve.
    ///
    /// Candidate arcs run through the curve at `low`, at the end parameter
    /// `high` and halfway between. A candidate is good when the curve at
    /// the quarter and three-quarter parameters lies within `error` of its
    /// circle. Starting from `high = 1`, the end grows by half the span
    /// after each good candidate and shrinks to the midpoint after each bad
    /// one, until a bad candidate follows a good one or the end would pass
    /// `t = 1`.
    ///
    /// Returns `None` if no good candidate was found, which includes every
    /// straight piece of curve.
    pub fn find_arc_starting_at(&self, error: f64, low: f64) -> Option<Arc> {
        let mut high = 1.0;
        let mut best: Option<Arc> = None;
        for _ in 0..MAX_FIT_ATTEMPTS {
            let mid = low + (high - low) / 2.0;
            if high > 1.0 || mid > 1.0 {
                return best;
            }
            let start_point = self.eval_unchecked(low);
            let end_point = self.eval_unchecked(high);
            let Some(circle) = fit_arc(start_point, end_point, self.eval_unchecked(mid)) else {
                return best;
            };
            let arc = Arc {
                center: circle.center,
                radius: circle.radius,
                start_point,
                end_point,
                start_t: low,
                end_t: high,
            };
            let offset = (high - mid) / 2.0;
            let good = [mid - offset, mid + offset]
                .into_iter()
                .all(|t| arc.radial_error(self.eval_unchecked(t)) <= error);
            trace!(low, high, good, radius = arc.radius, "arc candidate");
            if good {
                best = Some(arc);
                high += mid - low;
            } else if best.is_some() {
                return best;
            } else {
                high = mid;
            }
        }
        debug!(low, "arc search stopped after {MAX_FIT_ATTEMPTS} attempts");
        best
    }

    /// Cover the curve with arcs that each stay within `error` of it.
    ///
    /// Each arc starts where the previous one ended, the first at `t = 0`.
    /// The chain stops early at a piece that no arc fits, so a straight
    /// curve yields no arcs at all.
    pub fn find_arcs(&self, error: f64) -> Vec<Arc> {
        let mut arcs: Vec<Arc> = Vec::new();
        let mut low = 0.0;
        while low < 1.0 {
            match self.find_arc_starting_at(error, low) {
                Some(arc) if arc.end_t > low => {
                    low = arc.end_t;
                    arcs.push(arc);
                }
                _ => break,
            }
        }
        debug!(error, arcs = arcs.len(), end_t = low, "arc fitting done");
        arcs
    }
}

#[cfg(test)]
mod tests {
    use super::fit_arc;
    use crate::{BezierCurve, ParamCurve, Point};

    #[test]
    fn fit_three_points() {
        let circle = fit_arc(
            Point::new(1.0, 1.0),
            Point::new(2.0, 4.0),
            Point::new(5.0, 3.0),
        )
        .unwrap();
        assert!(circle.center.is_near(Point::new(3.0, 2.0), 1e-12), "{circle:?}");
        assert!((circle.radius - 5f64.sqrt()).abs() < 1e-12);

        let collinear = fit_arc(
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
        );
        assert_eq!(collinear, None);
    }

    #[test]
    fn arcs_cover_inflected_cubic() {
        let c = BezierCurve::cubic((52.0, 235.0), (56.0, 118.0), (204.0, 222.0), (179.0, 107.0));
        let error = 0.5;
        let arcs = c.find_arcs(error);
        assert_eq!(arcs.len(), 6, "{arcs:?}");
        assert_eq!(arcs[0].start_t, 0.0);
        assert_eq!(arcs[5].end_t, 1.0);
        for pair in arcs.windows(2) {
            assert_eq!(pair[0].end_t, pair[1].start_t);
            assert_eq!(pair[0].end_point, pair[1].start_point);
        }
        for arc in &arcs {
            assert_eq!(arc.start_point, c.eval(arc.start_t).unwrap());
            for i in 1..50 {
                let t = arc.start_t + (arc.end_t - arc.start_t) * i as f64 / 50.0;
                let e = arc.radial_error(c.eval(t).unwrap());
                assert!(e < error, "{e} at {t}");
            }
        }
    }

    #[test]
    fn arcs_cover_quadratic() {
        let c = BezierCurve::quadratic((0.0, 0.0), (50.0, 100.0), (100.0, 0.0));
        let arcs = c.find_arcs(0.1);
        assert_eq!(arcs.len(), 6, "{arcs:?}");
        assert_eq!(arcs.last().unwrap().end_t, 1.0);
    }

    #[test]
    fn straight_curve_has_no_arcs() {
        let c = BezierCurve::cubic((100.0, 0.0), (200.0, 0.0), (300.0, 0.0), (400.0, 0.0));
        assert!(c.find_arcs(0.5).is_empty());
        let c = BezierCurve::cubic((0.0, 0.0), (10.0, 20.0), (20.0, 40.0), (30.0, 60.0));
        assert!(c.find_arcs(0.1).is_empty());
        assert!(c.find_arc_starting_at(0.1, 0.25).is_none());
    }
}
