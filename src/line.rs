// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line segments.

use crate::error::check_param;
use crate::{
    Affine, CurveResult, Nearest, ParamCurve, ParamCurveArclen, ParamCurveNearest, Point, Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Relative tolerance of [`Line::contains`], as a fraction of the line length.
const CONTAINS_EPSILON: f64 = 1e-4;

/// A single line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The length of the line.
    #[inline]
    pub fn length(self) -> f64 {
        (self.p1 - self.p0).hypot()
    }

    /// The point at `t` along the infinite line through `p0` and `p1`.
    ///
    /// Unlike [`ParamCurve::eval`], `t` is not restricted to `[0, 1]`.
    #[inline]
    pub fn lerp(self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    /// The point where two segments cross.
    ///
    /// Both segments are treated as finite: the crossing must lie within
    /// each of them. Parallel and degenerate segments have no crossing.
    pub fn intersect(self, other: Line) -> Option<Point> {
        let ab = self.p1 - self.p0;
        let cd = other.p1 - other.p0;
        let denom = ab.cross(cd);
        if denom == 0.0 {
            return None;
        }
        let w = other.p0 - self.p0;
        let s = w.cross(cd) / denom;
        let u = w.cross(ab) / denom;
        if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&u) {
            Some(self.lerp(s))
        } else {
            None
        }
    }

    /// The translation and rotation that carry this line onto the +x axis.
    ///
    /// Translating by the returned vector moves `p0` to the origin; rotating
    /// by the returned angle (radians) then turns the direction of the line
    /// onto +x.
    #[inline]
    pub fn x_axis_alignment(self) -> (Vec2, f64) {
        let angle = -(self.p1 - self.p0).atan2();
        (-self.p0.to_vec2(), angle)
    }

    /// The rigid transform described by [`Line::x_axis_alignment`].
    #[inline]
    pub fn x_axis_transform(self) -> Affine {
        let (translation, angle) = self.x_axis_alignment();
        Affine::translate(translation).then_rotate(angle)
    }

    /// Whether `pt` lies on this finite segment.
    ///
    /// The test tolerates a distance from the segment of 1e-4 times its
    /// length, both across the line and past either end.
    pub fn contains(self, pt: Point) -> bool {
        let d = self.p1 - self.p0;
        let v = pt - self.p0;
        let len = d.hypot();
        if len == 0.0 {
            return v.hypot() <= CONTAINS_EPSILON;
        }
        let tol = CONTAINS_EPSILON * len;
        let across = d.cross(v).abs() / len;
        let along = d.dot(v) / len;
        across <= tol && along >= -tol && along <= len + tol
    }

    /// The closest point of the segment to `pt`.
    #[inline]
    pub fn project(self, pt: Point) -> Point {
        self.nearest(pt).point
    }
}

impl From<(Point, Point)> for Line {
    #[inline(always)]
    fn from((from, to): (Point, Point)) -> Self {
        Line::new(from, to)
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> CurveResult<Point> {
        Ok(self.lerp(check_param(t)?))
    }

    fn split(&self, t: f64) -> CurveResult<(Line, Line)> {
        let mid = self.eval(t)?;
        Ok((Line::new(self.p0, mid), Line::new(mid, self.p1)))
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ParamCurveArclen for Line {
    #[inline]
    fn arclen_at(&self, t: f64) -> CurveResult<f64> {
        Ok(check_param(t)? * self.length())
    }

    #[inline]
    fn arclen(&self) -> f64 {
        self.length()
    }
}

impl ParamCurveNearest for Line {
    fn nearest(&self, p: Point) -> Nearest {
        let d = self.p1 - self.p0;
        let v = p - self.p0;
        // Infinite or NaN for a zero-length segment.
        let t = d.dot(v) / d.hypot2();
        // Maps `-inf` and NaN to 0 and `inf` to 1.
        #[expect(
            clippy::manual_clamp,
            reason = "`clamp` would propagate NaN instead of mapping it to 0"
        )]
        let t = { t.max(0.).min(1.) };
        let point = self.lerp(t);
        Nearest {
            t,
            point,
            distance_sq: (p - point).hypot2(),
        }
    }
}
