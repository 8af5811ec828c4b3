// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular arcs approximating a piece of a curve.

use crate::{Circle, Point};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A circular arc approximating the curve over `start_t..end_t`.
///
/// Produced by [`BezierCurve::find_arcs`](crate::BezierCurve::find_arcs).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    /// The center of the fitted circle.
    pub center: Point,
    /// The radius of the fitted circle.
    pub radius: f64,
    /// The curve point at `start_t`.
    pub start_point: Point,
    /// The curve point at `end_t`.
    pub end_point: Point,
    /// Curve parameter where the arc begins.
    pub start_t: f64,
    /// Curve parameter where the arc ends.
    pub end_t: f64,
}

impl Arc {
    /// The full circle this arc lies on.
    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }

    /// How far `pt` is from the arc's circle, unsigned.
    #[inline]
    pub fn radial_error(&self, pt: Point) -> f64 {
        self.circle().signed_distance(pt).abs()
    }
}
