// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations: polynomial roots, bracketed root
//! finding and quadrature tables.

#![allow(missing_docs)]

use arrayvec::ArrayVec;

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("bcurve requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn acos(self) -> Self => acos;
    fn atan2(self, other: Self) -> Self => atan2;
    fn cbrt(self) -> Self => cbrt;
    fn ceil(self) -> Self => ceil;
    fn copysign(self, sign: Self) -> Self => copysign;
    fn cos(self) -> Self => cos;
    fn hypot(self, other: Self) -> Self => hypot;
    fn log2(self) -> Self => log2;
    fn powi(self, n: i32) -> Self => pow;
    fn sin_cos(self) -> (Self, Self) => sincos;
    fn sqrt(self) -> Self => sqrt;
}

/// Coefficients with a magnitude below this value are treated as zero by
/// the polynomial solvers, as are discriminants.
pub const ROOT_EPSILON: f64 = 1e-8;

/// Accept predicate selecting roots in the closed unit interval.
#[inline]
pub fn in_unit_interval(t: f64) -> bool {
    (0.0..=1.0).contains(&t)
}

/// Find real roots of linear equation.
///
/// Return values of x for which c0 + c1 x = 0. A leading coefficient
/// smaller than [`ROOT_EPSILON`] makes the equation degenerate, and no
/// roots are returned.
pub fn solve_linear(c0: f64, c1: f64) -> ArrayVec<f64, 1> {
    let mut result = ArrayVec::new();
    if c1.abs() >= ROOT_EPSILON {
        result.push(-c0 / c1);
    }
    result
}

/// Find real roots of quadratic equation.
///
/// Return values of x for which c0 + c1 x + c2 x² = 0, sorted.
///
/// When `c2` is below [`ROOT_EPSILON`] this falls back to [`solve_linear`].
/// A discriminant within [`ROOT_EPSILON`] of zero is reported as a single
/// repeated root.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    if c2.abs() < ROOT_EPSILON {
        result.extend(solve_linear(c0, c1));
        return result;
    }
    let disc = c1 * c1 - 4.0 * c2 * c0;
    if disc.abs() < ROOT_EPSILON {
        result.push(-c1 / (2.0 * c2));
    } else if disc > 0.0 {
        let sd = disc.sqrt();
        let a = (-c1 - sd) / (2.0 * c2);
        let b = (-c1 + sd) / (2.0 * c2);
        result.push(a.min(b));
        result.push(a.max(b));
    }
    result
}

/// Find real roots of cubic equation.
///
/// Return values of x for which c0 + c1 x + c2 x² + c3 x³ = 0, sorted.
///
/// The equation degrades to [`solve_quadratic`] when `c3` is below
/// [`ROOT_EPSILON`]. Otherwise the depressed cubic t³ + pt + q is solved
/// in closed form:
///
/// - p ≈ 0 gives the single root ∛(-q);
/// - q ≈ 0 gives 0, plus ±√(-p) when p is negative;
/// - a discriminant D = q²/4 + p³/27 near zero gives the simple and the
///   double root;
/// - D > 0 has one real root (Cardano);
/// - D < 0 has three real roots (trigonometric form).
///
/// A degenerate polynomial has no roots.
pub fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> ArrayVec<f64, 3> {
    solve_cubic_with(c0, c1, c2, c3, |_| true)
}

/// Find real roots of cubic equation lying in `[0, 1]`.
///
/// This is [`solve_cubic_with`] using [`in_unit_interval`] as the predicate.
pub fn solve_cubic_in_unit(c0: f64, c1: f64, c2: f64, c3: f64) -> ArrayVec<f64, 3> {
    solve_cubic_with(c0, c1, c2, c3, in_unit_interval)
}

/// Find real roots of cubic equation accepted by a predicate.
///
/// Same branching as [`solve_cubic`]; only the roots for which `accept`
/// returns true are kept. The result is sorted.
pub fn solve_cubic_with(
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    accept: impl Fn(f64) -> bool,
) -> ArrayVec<f64, 3> {
    let mut roots: ArrayVec<f64, 3> = if c3.abs() < ROOT_EPSILON {
        solve_quadratic(c0, c1, c2).into_iter().collect()
    } else {
        depressed_cubic_roots(c0, c1, c2, c3)
    };
    roots.retain(|t| accept(*t));
    roots.sort_unstable_by(f64::total_cmp);
    roots
}

fn depressed_cubic_roots(d: f64, c: f64, b: f64, a: f64) -> ArrayVec<f64, 3> {
    let mut result = ArrayVec::new();
    let p = (3.0 * a * c - b * b) / (3.0 * a * a);
    let q = (2.0 * b * b * b - 9.0 * a * b * c + 27.0 * a * a * d) / (27.0 * a * a * a);
    if p.abs() < ROOT_EPSILON {
        result.push((-q).cbrt());
    } else if q.abs() < ROOT_EPSILON {
        result.push(0.0);
        if p < 0.0 {
            let s = (-p).sqrt();
            result.push(s);
            result.push(-s);
        }
    } else {
        let disc = q * q / 4.0 + p * p * p / 27.0;
        if disc.abs() < ROOT_EPSILON {
            result.push(-1.5 * q / p);
            result.push(3.0 * q / p);
        } else if disc > 0.0 {
            let u = (-0.5 * q - disc.sqrt()).cbrt();
            result.push(u - p / (3.0 * u));
        } else {
            let u = 2.0 * (-p / 3.0).sqrt();
            // Rounding can push the argument just outside the domain of acos.
            let t = (3.0 * q / p / u).clamp(-1.0, 1.0).acos() / 3.0;
            let k = 2.0 * core::f64::consts::FRAC_PI_3;
            result.push(u * t.cos());
            result.push(u * (t - k).cos());
            result.push(u * (t - 2.0 * k).cos());
        }
    }
    let shift = b / (3.0 * a);
    for root in &mut result {
        *root -= shift;
    }
    result
}

/// Highest degree accepted by [`solve_poly_between`].
pub const MAX_POLY_DEGREE: usize = 6;

/// Coefficients `c[0] + c[1] x + … + c[6] x⁶` of a polynomial of degree at
/// most [`MAX_POLY_DEGREE`].
pub type PolyCoeffs = [f64; MAX_POLY_DEGREE + 1];

fn eval_poly(c: &PolyCoeffs, x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// Find real roots of a polynomial of degree at most six in `[lower, upper]`.
///
/// The roots of the derivative split the interval into pieces on which the
/// polynomial is monotonic; each piece whose ends differ in sign holds
/// exactly one root, located with [`solve_itp`] to within `epsilon`. Linear
/// polynomials are solved directly. An end value of exactly zero is itself
/// reported as a root, so a double root is found only when the polynomial
/// vanishes exactly at the critical point.
///
/// The result is sorted. A constant polynomial has no roots.
pub fn solve_poly_between(
    c: &PolyCoeffs,
    lower: f64,
    upper: f64,
    epsilon: f64,
) -> ArrayVec<f64, MAX_POLY_DEGREE> {
    let mut result = ArrayVec::new();
    let Some(degree) = c.iter().rposition(|&ci| ci != 0.0) else {
        return result;
    };
    match degree {
        0 => {}
        1 => {
            let x = -c[0] / c[1];
            if (lower..=upper).contains(&x) {
                result.push(x);
            }
        }
        _ => {
            let mut deriv = [0.0; MAX_POLY_DEGREE + 1];
            for (i, d) in deriv.iter_mut().enumerate().take(degree) {
                *d = (i + 1) as f64 * c[i + 1];
            }
            let critical = solve_poly_between(&deriv, lower, upper, epsilon);
            let mut last = lower;
            let mut last_val = eval_poly(c, last);
            if last_val == 0.0 {
                result.push(last);
            }
            let ends = critical.into_iter().filter(|&x| x > lower && x < upper);
            for x in ends.chain([upper]) {
                if x <= last {
                    continue;
                }
                let val = eval_poly(c, x);
                let root = if val == 0.0 {
                    Some(x)
                } else if last_val < 0.0 && val > 0.0 {
                    let k1 = 0.2 / (x - last);
                    let f = |t| eval_poly(c, t);
                    Some(solve_itp(f, last, x, epsilon, 1, k1, last_val, val))
                } else if last_val > 0.0 && val < 0.0 {
                    let k1 = 0.2 / (x - last);
                    let f = |t| -eval_poly(c, t);
                    Some(solve_itp(f, last, x, epsilon, 1, k1, -last_val, -val))
                } else {
                    None
                };
                // Rounding can place a root on a shared end twice.
                if let Some(root) = root.filter(|r| result.last() != Some(r)) {
                    if !result.is_full() {
                        result.push(root);
                    }
                }
                last = x;
                last_val = val;
            }
        }
    }
    result
}

/// Determinant of a 3x3 matrix given in row-major order.
#[inline]
pub fn determinant_3x3(m: [[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Solve an arbitrary function for a zero-crossing.
///
/// This uses the [ITP method], as described in the paper
/// [An Enhancement of the Bisection Method Average Performance Preserving Minmax Optimality].
///
/// The values of `ya` and `yb` are given as arguments rather than
/// computed from `f`, as the values may already be known, or they may
/// be less expensive to compute as special cases.
///
/// It is assumed that `ya < 0.0` and `yb > 0.0`, otherwise unexpected
/// results may occur.
///
/// The value of `epsilon` must be larger than 2^-63 times `b - a`,
/// otherwise integer overflow may occur.
///
/// `k2` is hardwired to 2. The `n0` parameter trades the bisection
/// guarantee (0) against a better chance for the secant step (1), and
/// `k1` is best left at `0.2 / (b - a)`.
///
/// When the function is monotonic, the returned result is guaranteed to
/// be within `epsilon` of the zero crossing.
///
/// [ITP method]: https://en.wikipedia.org/wiki/ITP_Method
/// [An Enhancement of the Bisection Method Average Performance Preserving Minmax Optimality]: https://dl.acm.org/doi/10.1145/3423597
#[expect(
    clippy::too_many_arguments,
    reason = "the bracket values are passed alongside the bracket"
)]
pub fn solve_itp(
    mut f: impl FnMut(f64) -> f64,
    mut a: f64,
    mut b: f64,
    epsilon: f64,
    n0: usize,
    k1: f64,
    mut ya: f64,
    mut yb: f64,
) -> f64 {
    let n1_2 = (((b - a) / epsilon).log2().ceil() - 1.0).max(0.0) as usize;
    let nmax = n0 + n1_2;
    let mut scaled_epsilon = epsilon * (1u64 << nmax) as f64;
    while b - a > 2.0 * epsilon {
        let x1_2 = 0.5 * (a + b);
        let r = scaled_epsilon - 0.5 * (b - a);
        let xf = (yb * a - ya * b) / (yb - ya);
        let sigma = x1_2 - xf;
        // k2 = 2
        let delta = k1 * (b - a).powi(2);
        let xt = if delta <= (x1_2 - xf).abs() {
            xf + delta.copysign(sigma)
        } else {
            x1_2
        };
        let xitp = if (xt - x1_2).abs() <= r {
            xt
        } else {
            x1_2 - r.copysign(sigma)
        };
        let yitp = f(xitp);
        if yitp > 0.0 {
            b = xitp;
            yb = yitp;
        } else if yitp < 0.0 {
            a = xitp;
            ya = yitp;
        } else {
            return xitp;
        }
        scaled_epsilon *= 0.5;
    }
    0.5 * (a + b)
}

// Table of Legendre-Gauss quadrature coefficients, adapted from:
// <https://pomax.github.io/bezierinfo/legendre-gauss.html>

/// Weights and abscissae of the 24-point Gauss-Legendre rule on `[-1, 1]`.
pub const GAUSS_LEGENDRE_COEFFS_24: &[(f64, f64)] = &[
    (0.1279381953467522, -0.0640568928626056),
    (0.1279381953467522, 0.0640568928626056),
    (0.1258374563468283, -0.1911188674736163),
    (0.1258374563468283, 0.1911188674736163),
    (0.1216704729278034, -0.3150426796961634),
    (0.1216704729278034, 0.3150426796961634),
    (0.1155056680537256, -0.4337935076260451),
    (0.1155056680537256, 0.4337935076260451),
    (0.1074442701159656, -0.5454214713888396),
    (0.1074442701159656, 0.5454214713888396),
    (0.0976186521041139, -0.6480936519369755),
    (0.0976186521041139, 0.6480936519369755),
    (0.0861901615319533, -0.7401241915785544),
    (0.0861901615319533, 0.7401241915785544),
    (0.0733464814110803, -0.8200019859739029),
    (0.0733464814110803, 0.8200019859739029),
    (0.0592985849154368, -0.8864155270044011),
    (0.0592985849154368, 0.8864155270044011),
    (0.0442774388174198, -0.9382745520027328),
    (0.0442774388174198, 0.9382745520027328),
    (0.0285313886289337, -0.9747285559713095),
    (0.0285313886289337, 0.9747285559713095),
    (0.0123412297999872, -0.9951872199970213),
    (0.0123412297999872, 0.9951872199970213),
];
