// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis extrema and bounding boxes.

use arrayvec::ArrayVec;

use crate::bezier::{derivative_points, power_basis};
use crate::common::solve_cubic_in_unit;
use crate::{BezierCurve, Degree, Point, Rect, Vec2};

/// The most parameters reported per axis: two roots of the derivative and
/// one of the second derivative.
pub const MAX_EXTREMA: usize = 3;

/// Parameters of axis extrema, per axis, each sorted ascending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extrema {
    /// Parameters where the derivative of x vanishes.
    pub x: ArrayVec<f64, MAX_EXTREMA>,
    /// Parameters where the derivative of y vanishes.
    pub y: ArrayVec<f64, MAX_EXTREMA>,
}

impl Extrema {
    /// All parameters of both axes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.x.iter().chain(&self.y).copied()
    }
}

/// Roots in `[0, 1]` of the polynomial with power-basis coefficients
/// `coeffs` along one axis.
fn unit_roots(coeffs: &[Vec2], axis: impl Fn(Vec2) -> f64) -> ArrayVec<f64, 3> {
    let mut c = [0.0; 4];
    for (slot, v) in c.iter_mut().zip(coeffs) {
        *slot = axis(*v);
    }
    solve_cubic_in_unit(c[0], c[1], c[2], c[3])
}

fn push_sorted(into: &mut ArrayVec<f64, MAX_EXTREMA>, roots: &[f64]) {
    for &t in roots {
        if into.try_push(t).is_err() {
            break;
        }
    }
    into.sort_unstable_by(f64::total_cmp);
}

impl BezierCurve {
    /// Parameters in `[0, 1]` where the derivative of either coordinate
    /// vanishes.
    ///
    /// For cubic curves the roots of the second derivative are included
    /// as well.
    pub fn extrema(&self) -> Extrema {
        let deriv = power_basis(self.derivative_points());
        let mut extrema = Extrema::default();
        push_sorted(&mut extrema.x, &unit_roots(&deriv, |v| v.x));
        push_sorted(&mut extrema.y, &unit_roots(&deriv, |v| v.y));
        if self.degree() == Degree::Cubic {
            let second = power_basis(&derivative_points(self.derivative_points()));
            push_sorted(&mut extrema.x, &unit_roots(&second, |v| v.x));
            push_sorted(&mut extrema.y, &unit_roots(&second, |v| v.y));
        }
        extrema
    }

    /// The axis-aligned bounding box.
    ///
    /// Covers the curve at `t = 0`, `t = 1` and every parameter of
    /// [`extrema`](Self::extrema).
    pub fn bounding_box(&self) -> Rect {
        let start = self.eval_unchecked(0.0);
        let end = self.eval_unchecked(1.0);
        self.extrema()
            .iter()
            .map(|t| self.eval_unchecked(t))
            .fold(Rect::from_points(start, end), |bbox, p: Point| {
                bbox.union_pt(p)
            })
    }
}
