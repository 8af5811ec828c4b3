// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circles.

use crate::common::determinant_3x3;
use crate::{Point, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Relative tolerance below which three points are considered collinear.
const COLLINEAR_EPSILON: f64 = 1e-12;

/// A circle.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Circle {
    /// The center.
    pub center: Point,
    /// The radius.
    pub radius: f64,
}

impl Circle {
    /// A new circle from center and radius.
    #[inline]
    pub fn new(center: impl Into<Point>, radius: f64) -> Circle {
        Circle {
            center: center.into(),
            radius,
        }
    }

    /// The circle passing through three points.
    ///
    /// The center is found from the determinants
    ///
    /// ```text
    /// | x  y  1 |    | x²+y²  y  1 |    | x²+y²  x  1 |
    /// | .. .. . |    | ..     .. . |    | ..     .. . |
    /// ```
    ///
    /// taken over the rows of `start`, `mid` and `end`. Returns `None` when
    /// the points are collinear, including when two of them coincide.
    pub fn through_points(start: Point, mid: Point, end: Point) -> Option<Circle> {
        let rows = [start, mid, end];
        let m11 = determinant_3x3(rows.map(|p| [p.x, p.y, 1.0]));
        let spread = (mid - start).hypot() * (end - start).hypot();
        if m11.is_nan() || m11.abs() <= COLLINEAR_EPSILON * spread {
            return None;
        }
        let m12 = determinant_3x3(rows.map(|p| [p.to_vec2().hypot2(), p.y, 1.0]));
        let m13 = determinant_3x3(rows.map(|p| [p.to_vec2().hypot2(), p.x, 1.0]));
        let center = Point::new(0.5 * m12 / m11, -0.5 * m13 / m11);
        Some(Circle {
            center,
            radius: center.distance(start),
        })
    }

    /// The bounding box of the circle.
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        let r = Vec2::new(self.radius.abs(), self.radius.abs());
        Rect::from_points(self.center - r, self.center + r)
    }

    /// Signed distance of `pt` from the circle: negative inside.
    #[inline]
    pub fn signed_distance(&self, pt: Point) -> f64 {
        self.center.distance(pt) - self.radius
    }
}

#[cfg(test)]
mod tests {
    use crate::{Circle, Point};

    #[test]
    fn circumcircle() {
        let c = Circle::through_points(
            Point::new(1.0, 1.0),
            Point::new(5.0, 3.0),
            Point::new(2.0, 4.0),
        )
        .unwrap();
        assert!(c.center.is_near(Point::new(3.0, 2.0), 1e-12), "{c:?}");
        assert!((c.radius - 5f64.sqrt()).abs() < 1e-12, "{c:?}");
    }

    #[test]
    fn circumcircle_collinear() {
        let p0 = Point::new(0.0, 0.0);
        assert!(Circle::through_points(p0, Point::new(1.0, 2.0), Point::new(3.0, 6.0)).is_none());
        assert!(Circle::through_points(p0, p0, Point::new(3.0, 6.0)).is_none());
        assert!(Circle::through_points(p0, p0, p0).is_none());
    }

    #[test]
    fn distance_sign() {
        let c = Circle::new((0.0, 0.0), 2.0);
        assert!(c.signed_distance(Point::new(1.0, 0.0)) < 0.0);
        assert!((c.signed_distance(Point::new(0.0, 3.0)) - 1.0).abs() < 1e-12);
        let bb = c.bounding_box();
        assert_eq!((bb.x0, bb.y1), (-2.0, 2.0));
    }
}
