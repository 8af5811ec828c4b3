// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bezier curves of degree 1 to 3.

use core::ops::Mul;

use arrayvec::ArrayVec;

use crate::error::check_param;
use crate::{Affine, CurveError, CurveResult, Line, ParamCurve, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The largest number of control points a curve can have.
pub const MAX_CONTROL_POINTS: usize = 4;

/// Power-basis coefficients, constant term first.
pub type Coefficients = ArrayVec<Vec2, MAX_CONTROL_POINTS>;

const BASIS_1: &[&[f64]] = &[&[1.0]];
const BASIS_2: &[&[f64]] = &[&[1.0, 0.0], &[-1.0, 1.0]];
const BASIS_3: &[&[f64]] = &[&[1.0, 0.0, 0.0], &[-2.0, 2.0, 0.0], &[1.0, -2.0, 1.0]];
const BASIS_4: &[&[f64]] = &[
    &[1.0, 0.0, 0.0, 0.0],
    &[-3.0, 3.0, 0.0, 0.0],
    &[3.0, -6.0, 3.0, 0.0],
    &[-1.0, 3.0, -3.0, 1.0],
];

/// The degree of a [`BezierCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Degree {
    /// Two control points.
    Linear,
    /// Three control points.
    Quadratic,
    /// Four control points.
    Cubic,
}

impl Degree {
    /// The degree of a curve with `count` control points.
    pub fn from_point_count(count: usize) -> CurveResult<Degree> {
        match count {
            2 => Ok(Degree::Linear),
            3 => Ok(Degree::Quadratic),
            4 => Ok(Degree::Cubic),
            _ => Err(CurveError::InvalidControlPointCount(count)),
        }
    }

    /// Number of control points of a curve of this degree.
    #[inline]
    pub fn point_count(self) -> usize {
        self.order() + 1
    }

    /// The polynomial order: 1, 2 or 3.
    #[inline]
    pub fn order(self) -> usize {
        match self {
            Degree::Linear => 1,
            Degree::Quadratic => 2,
            Degree::Cubic => 3,
        }
    }

    /// The Bernstein to power basis matrix of this degree.
    ///
    /// Row `i` holds the weights of the control points in the coefficient
    /// of `t^i`.
    #[inline]
    pub fn basis_matrix(self) -> &'static [&'static [f64]] {
        match self {
            Degree::Linear => BASIS_2,
            Degree::Quadratic => BASIS_3,
            Degree::Cubic => BASIS_4,
        }
    }
}

fn basis_matrix_for(count: usize) -> CurveResult<&'static [&'static [f64]]> {
    match count {
        // The derivative of a linear curve is a single point.
        1 => Ok(BASIS_1),
        _ => Ok(Degree::from_point_count(count)?.basis_matrix()),
    }
}

/// Expand Bernstein control points into power-basis coefficients.
///
/// Returns `c` such that the curve is `c[0] + c[1] t + c[2] t² + c[3] t³`,
/// truncated to the number of points. Counts outside `1..=4` have no basis
/// matrix and are rejected.
pub fn power_coefficients(points: &[Point]) -> CurveResult<Coefficients> {
    let matrix = basis_matrix_for(points.len())?;
    Ok(matrix
        .iter()
        .map(|row| {
            row.iter()
                .zip(points)
                .map(|(w, p)| p.to_vec2() * *w)
                .sum::<Vec2>()
        })
        .collect())
}

/// Repeated linear interpolation down to a single point.
///
/// An empty slice evaluates to the origin, which is the right answer for
/// the derivative of a constant.
pub(crate) fn de_casteljau(points: &[Point], t: f64) -> Point {
    let mut work: ArrayVec<Point, MAX_CONTROL_POINTS> = points.iter().copied().collect();
    while work.len() > 1 {
        for i in 0..work.len() - 1 {
            work[i] = work[i].lerp(work[i + 1], t);
        }
        work.pop();
    }
    work.first().copied().unwrap_or(Point::ORIGIN)
}

/// Control points of the derivative curve: `n · (P[i+1] − P[i])`.
pub(crate) fn derivative_points(points: &[Point]) -> ArrayVec<Point, 3> {
    let n = points.len().saturating_sub(1) as f64;
    points
        .windows(2)
        .map(|w| ((w[1] - w[0]) * n).to_point())
        .collect()
}

/// A Bezier curve with 2, 3 or 4 control points.
///
/// The derivative control points are kept alongside and recomputed on
/// every change of a control point.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierCurve {
    points: ArrayVec<Point, MAX_CONTROL_POINTS>,
    deriv: ArrayVec<Point, 3>,
}

impl BezierCurve {
    /// Create a curve from 2, 3 or 4 control points.
    pub fn from_points(points: &[Point]) -> CurveResult<BezierCurve> {
        Degree::from_point_count(points.len())?;
        Ok(Self::from_array(points.iter().copied().collect()))
    }

    fn from_array(points: ArrayVec<Point, MAX_CONTROL_POINTS>) -> BezierCurve {
        let deriv = derivative_points(&points);
        BezierCurve { points, deriv }
    }

    /// A straight segment.
    pub fn line(p0: impl Into<Point>, p1: impl Into<Point>) -> BezierCurve {
        Self::from_array([p0.into(), p1.into()].into_iter().collect())
    }

    /// A quadratic curve.
    pub fn quadratic(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
    ) -> BezierCurve {
        Self::from_array([p0.into(), p1.into(), p2.into()].into_iter().collect())
    }

    /// A cubic curve.
    pub fn cubic(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> BezierCurve {
        Self::from_array(ArrayVec::from([p0.into(), p1.into(), p2.into(), p3.into()]))
    }

    /// The control points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The control points of the derivative, one fewer than [`points`](Self::points).
    #[inline]
    pub fn derivative_points(&self) -> &[Point] {
        &self.deriv
    }

    /// The degree of the curve.
    #[inline]
    pub fn degree(&self) -> Degree {
        match self.points.len() {
            2 => Degree::Linear,
            3 => Degree::Quadratic,
            _ => Degree::Cubic,
        }
    }

    /// Replace the control point at `index`.
    ///
    /// Returns `false`, leaving the curve unchanged, when `index` is out of
    /// range. Otherwise the derivative points are recomputed before
    /// returning `true`.
    pub fn set_control_point(&mut self, index: usize, point: Point) -> bool {
        match self.points.get_mut(index) {
            Some(slot) => {
                *slot = point;
                self.deriv = derivative_points(&self.points);
                true
            }
            None => false,
        }
    }

    /// A copy of this curve with the control point at `index` replaced.
    ///
    /// Returns `None` when `index` is out of range.
    #[must_use]
    pub fn with_control_point(&self, index: usize, point: Point) -> Option<BezierCurve> {
        let mut curve = self.clone();
        curve.set_control_point(index, point).then_some(curve)
    }

    /// A copy of this curve moved to start at the origin and end on the +x
    /// axis.
    ///
    /// The motion is rigid, so the distance between any two points of the
    /// curve is unchanged. A curve whose ends coincide is only translated.
    #[must_use]
    pub fn aligned_with_x_axis(&self) -> BezierCurve {
        Line::new(self.start(), self.end()).x_axis_transform() * self.clone()
    }

    /// Evaluate with a parameter already known to be valid.
    pub(crate) fn eval_unchecked(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        match *self.points.as_slice() {
            [p0, p1, p2] => {
                (p0.to_vec2() * (mt * mt) + (p1.to_vec2() * (mt * 2.0) + p2.to_vec2() * t) * t)
                    .to_point()
            }
            [p0, p1, p2, p3] => (p0.to_vec2() * (mt * mt * mt)
                + (p1.to_vec2() * (mt * mt * 3.0)
                    + (p2.to_vec2() * (mt * 3.0) + p3.to_vec2() * t) * t)
                    * t)
                .to_point(),
            _ => de_casteljau(&self.points, t),
        }
    }

    /// Evaluate by repeated linear interpolation, for any degree.
    ///
    /// [`ParamCurve::eval`] uses the Bernstein closed form for quadratic
    /// and cubic curves; the two agree to rounding error.
    pub fn eval_de_casteljau(&self, t: f64) -> CurveResult<Point> {
        Ok(de_casteljau(&self.points, check_param(t)?))
    }

    pub(crate) fn derivative_unchecked(&self, t: f64) -> Vec2 {
        de_casteljau(&self.deriv, t).to_vec2()
    }

    fn second_derivative_unchecked(&self, t: f64) -> Vec2 {
        de_casteljau(&derivative_points(&self.deriv), t).to_vec2()
    }

    /// The first derivative at `t`.
    pub fn derivative(&self, t: f64) -> CurveResult<Vec2> {
        Ok(self.derivative_unchecked(check_param(t)?))
    }

    /// The unit tangent at `t`.
    ///
    /// At a cusp the derivative vanishes and the result has NaN components.
    pub fn derivative_normalized(&self, t: f64) -> CurveResult<Vec2> {
        Ok(self.derivative(t)?.normalize())
    }

    /// The second derivative at `t`.
    pub fn second_derivative(&self, t: f64) -> CurveResult<Vec2> {
        Ok(self.second_derivative_unchecked(check_param(t)?))
    }

    /// Signed curvature at `t`.
    ///
    /// Returns NaN where the first derivative vanishes.
    pub fn curvature(&self, t: f64) -> CurveResult<f64> {
        let t = check_param(t)?;
        let d = self.derivative_unchecked(t);
        let d2 = self.second_derivative_unchecked(t);
        let denom = d.hypot2().powi(3).sqrt();
        if denom == 0.0 {
            return Ok(f64::NAN);
        }
        Ok(d.cross(d2) / denom)
    }

    /// Power-basis coefficients of the curve, constant term first.
    pub fn coefficients(&self) -> Coefficients {
        power_basis(&self.points)
    }

    /// Power-basis coefficients of the derivative, constant term first.
    pub fn derivative_coefficients(&self) -> Coefficients {
        power_basis(&self.deriv)
    }

    /// Split at `t` by repeated linear interpolation, for any degree.
    pub fn split_de_casteljau(&self, t: f64) -> CurveResult<(BezierCurve, BezierCurve)> {
        let t = check_param(t)?;
        let mut left = ArrayVec::new();
        let mut right = ArrayVec::new();
        let mut work = self.points.clone();
        while let (Some(&first), Some(&last)) = (work.first(), work.last()) {
            left.push(first);
            right.push(last);
            for i in 0..work.len() - 1 {
                work[i] = work[i].lerp(work[i + 1], t);
            }
            work.pop();
        }
        right.reverse();
        Ok((Self::from_array(left), Self::from_array(right)))
    }

    pub(crate) fn split_unchecked(&self, t: f64) -> (BezierCurve, BezierCurve) {
        let mt = 1.0 - t;
        match *self.points.as_slice() {
            [p0, p1, p2] => {
                let p01 = p0.lerp(p1, t);
                let p12 = p1.lerp(p2, t);
                let pt = self.eval_unchecked(t);
                (
                    Self::quadratic(p0, p01, pt),
                    Self::quadratic(pt, p12, p2),
                )
            }
            [p0, p1, p2, p3] => {
                let (v0, v1, v2, v3) = (p0.to_vec2(), p1.to_vec2(), p2.to_vec2(), p3.to_vec2());
                let l1 = v0 * mt + v1 * t;
                let l2 = v0 * (mt * mt) + v1 * (2.0 * mt * t) + v2 * (t * t);
                let r1 = v1 * (mt * mt) + v2 * (2.0 * mt * t) + v3 * (t * t);
                let r2 = v2 * mt + v3 * t;
                let pt = self.eval_unchecked(t);
                (
                    Self::cubic(p0, l1.to_point(), l2.to_point(), pt),
                    Self::cubic(pt, r1.to_point(), r2.to_point(), p3),
                )
            }
            [p0, p1] => {
                let pt = p0.lerp(p1, t);
                (Self::line(p0, pt), Self::line(pt, p1))
            }
            _ => (self.clone(), self.clone()),
        }
    }
}

/// Power basis for a slice already known to hold 0 to 4 points.
pub(crate) fn power_basis(points: &[Point]) -> Coefficients {
    power_coefficients(points).unwrap_or_default()
}

impl ParamCurve for BezierCurve {
    #[inline]
    fn eval(&self, t: f64) -> CurveResult<Point> {
        Ok(self.eval_unchecked(check_param(t)?))
    }

    fn split(&self, t: f64) -> CurveResult<(BezierCurve, BezierCurve)> {
        Ok(self.split_unchecked(check_param(t)?))
    }

    #[inline]
    fn start(&self) -> Point {
        self.points.first().copied().unwrap_or_default()
    }

    #[inline]
    fn end(&self) -> Point {
        self.points.last().copied().unwrap_or_default()
    }
}

impl TryFrom<&[Point]> for BezierCurve {
    type Error = CurveError;

    fn try_from(points: &[Point]) -> CurveResult<BezierCurve> {
        BezierCurve::from_points(points)
    }
}

impl From<Line> for BezierCurve {
    #[inline]
    fn from(line: Line) -> BezierCurve {
        BezierCurve::line(line.p0, line.p1)
    }
}

impl Mul<BezierCurve> for Affine {
    type Output = BezierCurve;

    fn mul(self, other: BezierCurve) -> BezierCurve {
        BezierCurve::from_array(other.points.iter().map(|&p| self * p).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        power_coefficients, Affine, BezierCurve, CurveError, Degree, ParamCurve, Point, Vec2,
    };
    use core::f64::consts::FRAC_PI_2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn test_curves() -> [BezierCurve; 4] {
        [
            BezierCurve::line((10.0, 20.0), (-30.0, 45.0)),
            BezierCurve::quadratic((70.0, 250.0), (20.0, 110.0), (220.0, 60.0)),
            BezierCurve::cubic((110.0, 150.0), (25.0, 190.0), (210.0, 250.0), (210.0, 30.0)),
            BezierCurve::cubic((176.0, 135.0), (45.0, 235.0), (220.0, 235.0), (98.0, 127.0)),
        ]
    }

    #[test]
    fn construction() {
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)];
        let c = BezierCurve::from_points(&pts).unwrap();
        assert_eq!(c.degree(), Degree::Quadratic);
        assert_eq!(c.points(), &pts);
        assert_eq!(
            c.derivative_points(),
            &[Point::new(2.0, 2.0), Point::new(2.0, -2.0)]
        );
        assert_eq!(
            BezierCurve::from_points(&pts[..1]),
            Err(CurveError::InvalidControlPointCount(1))
        );
        let five = [Point::ORIGIN; 5];
        assert_eq!(
            BezierCurve::try_from(&five[..]),
            Err(CurveError::InvalidControlPointCount(5))
        );
        assert_eq!(Degree::Cubic.point_count(), 4);
    }

    #[test]
    fn eval_bounds() {
        for c in test_curves() {
            assert_eq!(c.eval(-0.1), Err(CurveError::ParameterOutOfBounds(-0.1)));
            assert!(c.eval(1.0 + 1e-9).is_err());
            assert!(c.eval(f64::NAN).is_err());
            assert!(c.derivative(2.0).is_err());
            assert!(c.curvature(-1.0).is_err());
            assert!(c.split(1.5).is_err());
            assert_eq!(c.eval(0.0).unwrap(), c.start());
            assert_eq!(c.eval(1.0).unwrap(), c.end());
        }
    }

    #[test]
    fn closed_form_matches_de_casteljau() {
        let n = 100;
        for c in test_curves() {
            for i in 0..=n {
                let t = i as f64 / n as f64;
                let a = c.eval(t).unwrap();
                let b = c.eval_de_casteljau(t).unwrap();
                assert!(a.is_near(b, 1e-9), "{a:?} {b:?} at {t}");
            }
        }
    }

    #[test]
    fn split_reproduces_curve() {
        let n = 10;
        for c in test_curves() {
            for i in 0..=n {
                let t = i as f64 / n as f64;
                let (left, right) = c.split(t).unwrap();
                let (left_dc, right_dc) = c.split_de_casteljau(t).unwrap();
                for j in 0..=n {
                    let s = j as f64 / n as f64;
                    let expected = c.eval(s * t).unwrap();
                    assert!(left.eval(s).unwrap().is_near(expected, 1e-9));
                    assert!(left_dc.eval(s).unwrap().is_near(expected, 1e-9));
                    let expected = c.eval(t + s * (1.0 - t)).unwrap();
                    assert!(right.eval(s).unwrap().is_near(expected, 1e-9));
                    assert!(right_dc.eval(s).unwrap().is_near(expected, 1e-9));
                }
                assert_eq!(left.degree(), c.degree());
            }
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let h = 1e-6;
        for c in test_curves() {
            for t in [0.1, 0.3, 0.5, 0.9] {
                let d = c.derivative(t).unwrap();
                let fd = (c.eval(t + h).unwrap() - c.eval(t - h).unwrap()) / (2.0 * h);
                assert!((d - fd).hypot() < 1e-4, "{d:?} {fd:?}");
            }
        }
    }

    #[test]
    fn curvature_of_circular_quadrant() {
        // Cubic approximation of a unit quarter circle.
        let k = 0.5519150244935105707435627;
        let c = BezierCurve::cubic((1.0, 0.0), (1.0, k), (k, 1.0), (0.0, 1.0));
        let curvature = c.curvature(0.5).unwrap();
        assert!((curvature - 1.0).abs() < 1e-2, "{curvature}");
        let tangent = c.derivative_normalized(0.0).unwrap();
        assert!((tangent - Vec2::new(0.0, 1.0)).hypot() < 1e-12, "{tangent:?}");
        assert!(c.second_derivative(0.5).unwrap().hypot() > 0.0);

        let line = BezierCurve::line((0.0, 0.0), (3.0, 4.0));
        assert_eq!(line.curvature(0.5).unwrap(), 0.0);
    }

    #[test]
    fn curvature_at_cusp() {
        // Coincident control points make the derivative vanish at t = 0.
        let c = BezierCurve::cubic((0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (2.0, 0.0));
        assert!(c.curvature(0.0).unwrap().is_nan());
        assert!(c.derivative_normalized(0.0).unwrap().is_nan());
    }

    #[test]
    fn coefficients() {
        let c = BezierCurve::cubic((0.0, 0.0), (1.0, 2.0), (3.0, 3.0), (4.0, 0.0));
        let coeffs = c.coefficients();
        assert_eq!(coeffs.len(), 4);
        for t in [0.0, 0.25, 0.7, 1.0] {
            let p = coeffs[0] + coeffs[1] * t + coeffs[2] * (t * t) + coeffs[3] * (t * t * t);
            assert!(p.to_point().is_near(c.eval(t).unwrap(), 1e-12));
        }
        let d = c.derivative_coefficients();
        assert_eq!(d.len(), 3);
        assert_eq!(d[0], c.derivative(0.0).unwrap());

        assert_eq!(power_coefficients(&[Point::new(2.0, 3.0)]).unwrap()[0], Vec2::new(2.0, 3.0));
        assert_eq!(
            power_coefficients(&[Point::ORIGIN; 5]),
            Err(CurveError::InvalidControlPointCount(5))
        );
        assert_eq!(
            power_coefficients(&[]),
            Err(CurveError::InvalidControlPointCount(0))
        );
    }

    #[test]
    fn set_control_point() {
        let mut c = BezierCurve::quadratic((0.0, 0.0), (1.0, 1.0), (2.0, 0.0));
        let before = c.clone();
        assert!(!c.set_control_point(3, Point::new(9.0, 9.0)));
        assert_eq!(c, before);

        assert!(c.set_control_point(1, Point::new(1.0, 3.0)));
        assert_eq!(c.points()[1], Point::new(1.0, 3.0));
        assert_eq!(c.derivative_points()[0], Point::new(2.0, 6.0));
        assert_eq!(c.derivative(0.0).unwrap(), Vec2::new(2.0, 6.0));

        assert!(before.with_control_point(7, Point::ORIGIN).is_none());
        let moved = before.with_control_point(0, Point::new(-1.0, 0.0)).unwrap();
        assert_eq!(moved.start(), Point::new(-1.0, 0.0));
        assert_eq!(before.start(), Point::ORIGIN);
    }

    #[test]
    fn transform_curve() {
        let c = BezierCurve::quadratic((1.0, 0.0), (1.0, 1.0), (0.0, 1.0));
        let r = Affine::rotate(FRAC_PI_2) * c.clone();
        assert!(r.end().is_near(Point::new(-1.0, 0.0), 1e-12));
        assert!(r.derivative_points()[0].is_near(Point::new(-2.0, 0.0), 1e-12));
    }

    #[test]
    fn align_with_x_axis() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let n = rng.random_range(2..=4);
            let points: Vec<Point> = (0..n)
                .map(|_| {
                    Point::new(
                        rng.random_range(-500.0..500.0),
                        rng.random_range(-500.0..500.0),
                    )
                })
                .collect();
            let c = BezierCurve::from_points(&points).unwrap();
            let aligned = c.aligned_with_x_axis();
            assert_eq!(aligned.points().len(), n);
            assert!(aligned.start().is_near(Point::ORIGIN, 1e-9), "{aligned:?}");
            assert!(aligned.end().y.abs() < 1e-9, "{aligned:?}");
            assert!(aligned.end().x > 0.0);
            for i in 0..=100 {
                let t = i as f64 / 100.0;
                let expected = c.start().distance(c.eval(t).unwrap());
                let actual = aligned.start().distance(aligned.eval(t).unwrap());
                assert!((expected - actual).abs() < 1e-9, "{expected} != {actual}");
            }
        }

        let closed = BezierCurve::cubic((3.0, 4.0), (10.0, 0.0), (0.0, 10.0), (3.0, 4.0));
        let aligned = closed.aligned_with_x_axis();
        assert!(aligned.end().is_near(Point::ORIGIN, 1e-12));
        assert!(aligned.points()[1].is_near(Point::new(7.0, -4.0), 1e-12));
    }
}
