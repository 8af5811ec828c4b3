// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A trait for curves parametrized by a scalar.

use crate::{CurveResult, Point};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Number of intervals in a look-up table when none is given.
pub const DEFAULT_LUT_STEPS: usize = 100;

/// A curve parametrized by a scalar.
///
/// The parameter is always in `[0, 1]`; every method taking one returns
/// [`CurveError::ParameterOutOfBounds`](crate::CurveError::ParameterOutOfBounds)
/// for anything else, NaN included. Values are never clamped.
pub trait ParamCurve: Sized {
    /// Evaluate the curve at parameter `t`.
    fn eval(&self, t: f64) -> CurveResult<Point>;

    /// Subdivide into two curves of the same kind at parameter `t`.
    ///
    /// The first half covers `0..t`, the second `t..1`, both reparametrized
    /// to `[0, 1]`.
    fn split(&self, t: f64) -> CurveResult<(Self, Self)>;

    /// The start point.
    fn start(&self) -> Point;

    /// The end point.
    fn end(&self) -> Point;
}

/// A parametrized curve that can have its arc length measured.
pub trait ParamCurveArclen: ParamCurve {
    /// The arc length of the curve from `0` to `t`.
    fn arclen_at(&self, t: f64) -> CurveResult<f64>;

    /// The arc length of the whole curve.
    fn arclen(&self) -> f64;
}

/// The nearest position on a curve to some point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    /// The position on the curve.
    pub t: f64,
    /// The curve point at `t`.
    pub point: Point,
    /// The squared distance from the query to `point`.
    pub distance_sq: f64,
}

impl Nearest {
    /// The distance from the query to the nearest point.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance_sq.sqrt()
    }
}

/// A parametrized curve that reports the nearest point.
pub trait ParamCurveNearest {
    /// Find the position on the curve that is nearest to the given point.
    fn nearest(&self, p: Point) -> Nearest;
}
