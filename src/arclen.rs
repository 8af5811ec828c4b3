// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc length of Bezier curves, look-up tables and moving along a curve
//! by distance.

use core::iter::FusedIterator;

use crate::common::{solve_itp, GAUSS_LEGENDRE_COEFFS_24};
use crate::error::check_param;
use crate::{BezierCurve, CurveResult, ParamCurveArclen, Point};

/// Parameter accuracy of [`BezierCurve::advance`].
const ADVANCE_ACCURACY: f64 = 1e-12;

/// A sample of a look-up table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LutSample {
    /// The curve parameter.
    pub t: f64,
    /// The curve point at `t`.
    pub point: Point,
}

/// Uniformly spaced samples of a curve.
///
/// Created by [`BezierCurve::lut_with_t`]. Yields `steps + 1` samples at
/// `t = i / steps`; the last one is at exactly `t = 1`. Cloning the
/// iterator restarts from its current position.
#[derive(Clone, Debug)]
pub struct Lut<'a> {
    curve: &'a BezierCurve,
    steps: usize,
    next: usize,
}

impl Lut<'_> {
    fn t_at(&self, i: usize) -> f64 {
        if i >= self.steps {
            1.0
        } else {
            i as f64 / self.steps as f64
        }
    }
}

impl Iterator for Lut<'_> {
    type Item = LutSample;

    fn next(&mut self) -> Option<LutSample> {
        if self.next > self.steps {
            return None;
        }
        let t = if self.steps == 0 { 0.0 } else { self.t_at(self.next) };
        self.next += 1;
        Some(LutSample {
            t,
            point: self.curve.eval_unchecked(t),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Lut<'_> {}

impl FusedIterator for Lut<'_> {}

/// The outcome of [`BezierCurve::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    /// The target lies on the curve.
    Within {
        /// Parameter of the target.
        t: f64,
        /// The curve point at `t`.
        point: Point,
    },
    /// The target lies past the end of the curve.
    AfterEnd {
        /// Length left over beyond `t = 1`.
        remaining: f64,
    },
    /// The target lies before the start of the curve.
    BeforeStart {
        /// Length left over before `t = 0`.
        remaining: f64,
    },
}

impl BezierCurve {
    /// Arc length from `0` to `t`, without checking `t`.
    ///
    /// 24-point Gauss-Legendre quadrature of the derivative magnitude,
    /// with the nodes mapped from `[-1, 1]` onto `[0, t]`.
    pub(crate) fn arclen_unchecked(&self, t: f64) -> f64 {
        let z = 0.5 * t;
        let sum: f64 = GAUSS_LEGENDRE_COEFFS_24
            .iter()
            .map(|&(wi, xi)| wi * self.derivative_unchecked(z * xi + z).hypot())
            .sum();
        z * sum
    }

    /// A look-up table of `steps + 1` points, uniform in `t`.
    ///
    /// See [`lut_with_t`](Self::lut_with_t).
    pub fn lut(&self, steps: usize) -> impl ExactSizeIterator<Item = Point> + Clone + '_ {
        self.lut_with_t(steps).map(|sample| sample.point)
    }

    /// A look-up table of `steps + 1` samples with their parameters.
    ///
    /// The samples are computed lazily. With `steps == 0` the table holds
    /// the start point only.
    pub fn lut_with_t(&self, steps: usize) -> Lut<'_> {
        Lut {
            curve: self,
            steps,
            next: 0,
        }
    }

    /// Cumulative arc lengths at the parameters of [`lut`](Self::lut).
    pub fn arclen_lut(&self, steps: usize) -> impl ExactSizeIterator<Item = f64> + Clone + '_ {
        self.lut_with_t(steps)
            .map(move |sample| self.arclen_unchecked(sample.t))
    }

    /// Move along the curve from `t` by a signed arc length.
    ///
    /// A negative `distance` moves towards the start. When the target
    /// falls outside the curve, the length left over past the respective
    /// end is reported instead of a position.
    pub fn advance(&self, t: f64, distance: f64) -> CurveResult<Advance> {
        let t = check_param(t)?;
        let total = self.arclen();
        let target = self.arclen_unchecked(t) + distance;
        if target > total {
            return Ok(Advance::AfterEnd {
                remaining: target - total,
            });
        }
        if target < 0.0 {
            return Ok(Advance::BeforeStart { remaining: -target });
        }
        let t = if target == 0.0 {
            0.0
        } else if target == total {
            1.0
        } else {
            solve_itp(
                |s| self.arclen_unchecked(s) - target,
                0.0,
                1.0,
                ADVANCE_ACCURACY,
                1,
                0.2,
                -target,
                total - target,
            )
        };
        Ok(Advance::Within {
            t,
            point: self.eval_unchecked(t),
        })
    }
}

impl ParamCurveArclen for BezierCurve {
    fn arclen_at(&self, t: f64) -> CurveResult<f64> {
        Ok(self.arclen_unchecked(check_param(t)?))
    }

    #[inline]
    fn arclen(&self) -> f64 {
        self.arclen_unchecked(1.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Advance, BezierCurve, ParamCurve, ParamCurveArclen, Point, DEFAULT_LUT_STEPS};
    use alloc::vec::Vec;

    fn quad() -> BezierCurve {
        BezierCurve::quadratic((0.0, 0.0), (50.0, 100.0), (100.0, 0.0))
    }

    #[test]
    fn straight_line_length() {
        let c = BezierCurve::cubic((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0));
        let expected = 3.0 * 2f64.sqrt();
        assert!((c.arclen() - expected).abs() < 1e-12);
        assert!((c.arclen_at(0.5).unwrap() - 0.5 * expected).abs() < 1e-12);
    }

    #[test]
    fn quadratic_length() {
        // Closed form for a parabola.
        let c = quad();
        let expected = 147.89428575445973;
        assert!((c.arclen() - expected).abs() < 1e-9, "{}", c.arclen());
        assert_eq!(c.arclen(), c.arclen_at(1.0).unwrap());
        assert_eq!(c.arclen_at(0.0).unwrap(), 0.0);
        assert!(c.arclen_at(1.1).is_err());
    }

    #[test]
    fn length_is_monotonic() {
        let c = BezierCurve::cubic((52.0, 235.0), (56.0, 118.0), (204.0, 222.0), (179.0, 107.0));
        let lengths: Vec<f64> = c.arclen_lut(200).collect();
        assert_eq!(lengths.len(), 201);
        for pair in lengths.windows(2) {
            assert!(pair[1] >= pair[0], "{pair:?}");
        }
        assert_eq!(*lengths.last().unwrap(), c.arclen());
    }

    #[test]
    fn lut_shape() {
        let c = quad();
        let lut = c.lut_with_t(DEFAULT_LUT_STEPS);
        assert_eq!(lut.len(), 101);
        let samples: Vec<_> = lut.clone().collect();
        assert_eq!(samples[0].t, 0.0);
        assert_eq!(samples[100].t, 1.0);
        assert_eq!(samples[100].point, c.end());
        assert_eq!(samples[50].point, c.eval(0.5).unwrap());
        // The clone is independent and restartable.
        assert_eq!(lut.count(), 101);

        let points: Vec<Point> = c.lut(3).collect();
        assert_eq!(points.len(), 4);
        assert_eq!(points[3], Point::new(100.0, 0.0));

        let single: Vec<Point> = c.lut(0).collect();
        assert_eq!(single, [c.start()]);
    }

    #[test]
    fn advance_within() {
        let c = quad();
        let Advance::Within { t, point } = c.advance(0.5, 30.0).unwrap() else {
            panic!("expected to stay on the curve");
        };
        let moved = c.arclen_at(t).unwrap() - c.arclen_at(0.5).unwrap();
        assert!((moved - 30.0).abs() < 1e-6, "{moved}");
        assert_eq!(point, c.eval(t).unwrap());

        let Advance::Within { t, point } = c.advance(0.0, c.arclen()).unwrap() else {
            panic!("expected to reach the end");
        };
        assert!((t - 1.0).abs() < 1e-9);
        assert!(point.is_near(Point::new(100.0, 0.0), 1e-6));

        let Advance::Within { t, .. } = c.advance(0.7, -20.0).unwrap() else {
            panic!("expected to stay on the curve");
        };
        assert!(t < 0.7);
    }

    #[test]
    fn advance_past_ends() {
        let c = quad();
        match c.advance(0.8, 100.0).unwrap() {
            Advance::AfterEnd { remaining } => {
                let expected = c.arclen_at(0.8).unwrap() + 100.0 - c.arclen();
                assert!((remaining - expected).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
        match c.advance(0.2, -50.0).unwrap() {
            Advance::BeforeStart { remaining } => {
                let expected = 50.0 - c.arclen_at(0.2).unwrap();
                assert!((remaining - expected).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(c.advance(-0.5, 1.0).is_err());
    }
}
