// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest point on a Bezier curve.

use crate::{BezierCurve, CurveOpts, Nearest, ParamCurve, ParamCurveNearest, Point};

/// Each round at least halves the bracket, so this reaches the smallest
/// tolerance from a bracket as wide as the whole curve.
const MAX_REFINE_ROUNDS: usize = 64;

impl BezierCurve {
    /// The point of the curve nearest to `p`.
    ///
    /// The closest sample of a look-up table with
    /// [`CurveOpts::projection_steps`] intervals is bracketed by its
    /// neighbours. The quarter points of the bracket are tested, and the
    /// bracket is halved around the best parameter found so far, until it is
    /// narrower than [`CurveOpts::projection_tolerance`], which is taken to
    /// be at least `f64::EPSILON`.
    ///
    /// The result is never farther from `p` than any sample of the table.
    pub fn nearest_with(&self, p: Point, opts: &CurveOpts) -> Nearest {
        let steps = opts.projection_steps.max(1);
        let mut best = Nearest {
            t: 0.0,
            point: self.start(),
            distance_sq: f64::INFINITY,
        };
        let mut best_i = 0;
        for (i, sample) in self.lut_with_t(steps).enumerate() {
            let distance_sq = (sample.point - p).hypot2();
            if distance_sq < best.distance_sq {
                best = Nearest {
                    t: sample.t,
                    point: sample.point,
                    distance_sq,
                };
                best_i = i;
            }
        }
        let mut low = best_i.saturating_sub(1) as f64 / steps as f64;
        let mut high = (best_i + 1).min(steps) as f64 / steps as f64;
        let tolerance = opts.projection_tolerance.max(f64::EPSILON);
        for _ in 0..MAX_REFINE_ROUNDS {
            if high - low <= tolerance {
                break;
            }
            let span = high - low;
            for t in [low + 0.25 * span, low + 0.75 * span] {
                let point = self.eval_unchecked(t);
                let distance_sq = (point - p).hypot2();
                if distance_sq < best.distance_sq {
                    best = Nearest {
                        t,
                        point,
                        distance_sq,
                    };
                }
            }
            let half = 0.25 * span;
            low = (best.t - half).max(0.0);
            high = (best.t + half).min(1.0);
        }
        best
    }
}

impl ParamCurveNearest for BezierCurve {
    /// Uses [`CurveOpts::default`]; see [`BezierCurve::nearest_with`].
    fn nearest(&self, p: Point) -> Nearest {
        self.nearest_with(p, &CurveOpts::default())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::{BezierCurve, CurveOpts, ParamCurve, ParamCurveNearest, Point, DEFAULT_LUT_STEPS};

    #[test]
    fn nearest_on_parabola() {
        let c = BezierCurve::quadratic((0.0, 0.0), (50.0, 100.0), (100.0, 0.0));
        let n = c.nearest(Point::new(50.0, 80.0));
        assert!((n.t - 0.5).abs() < 1e-5, "{n:?}");
        assert!((n.distance() - 30.0).abs() < 1e-6, "{n:?}");
        assert_eq!(n.point, c.eval(n.t).unwrap());

        let n = c.nearest(Point::new(-10.0, -10.0));
        assert_eq!(n.t, 0.0);
        assert_eq!(n.point, Point::ORIGIN);
    }

    #[test]
    fn nearest_on_curve_is_exact() {
        let c = BezierCurve::cubic((110.0, 150.0), (25.0, 190.0), (210.0, 250.0), (210.0, 30.0));
        for t in [0.123, 0.5, 0.77] {
            let p = c.eval(t).unwrap();
            let n = c.nearest(p);
            assert!(n.distance() < 1e-3, "{n:?}");
            assert!((n.t - t).abs() < 1e-4, "{n:?} for {t}");
        }
    }

    #[test]
    fn coarse_options() {
        let c = BezierCurve::quadratic((0.0, 0.0), (50.0, 100.0), (100.0, 0.0));
        let opts = CurveOpts::default()
            .with_projection_steps(0)
            .with_projection_tolerance(1e-9);
        let n = c.nearest_with(Point::new(50.0, 80.0), &opts);
        assert!((n.t - 0.5).abs() < 1e-6, "{n:?}");
    }

    #[test]
    fn degenerate_tolerance_terminates() {
        let c = BezierCurve::quadratic((0.0, 0.0), (50.0, 100.0), (100.0, 0.0));
        let p = Point::new(50.0, 80.0);
        let opts = CurveOpts::default().with_projection_tolerance(-1.0);
        assert_eq!(opts.projection_tolerance, f64::EPSILON);
        for tolerance in [-1.0, 0.0, f64::NAN] {
            let opts = CurveOpts {
                projection_tolerance: tolerance,
                ..CurveOpts::default()
            };
            let n = c.nearest_with(p, &opts);
            assert!((n.t - 0.5).abs() < 1e-6, "{n:?}");
            assert!((n.distance() - 30.0).abs() < 1e-6, "{n:?}");
        }
    }

    #[test]
    fn nearest_dominates_lut() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..300 {
            let n = rng.random_range(2..=4);
            let points: Vec<Point> = (0..n)
                .map(|_| {
                    Point::new(
                        rng.random_range(-100.0..100.0),
                        rng.random_range(-100.0..100.0),
                    )
                })
                .collect();
            let c = BezierCurve::from_points(&points).unwrap();
            let q = Point::new(
                rng.random_range(-150.0..150.0),
                rng.random_range(-150.0..150.0),
            );
            let nearest = c.nearest(q);
            for sample in c.lut(DEFAULT_LUT_STEPS) {
                let d = (sample - q).hypot2();
                assert!(nearest.distance_sq <= d, "{nearest:?} vs {sample:?}");
            }
        }
    }
}
