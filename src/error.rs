// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for curve construction and evaluation.

use thiserror::Error;

/// Errors reported by curve operations.
///
/// Degenerate geometry is not an error: a collinear arc fit yields `None`,
/// curvature at a cusp is NaN and a degenerate polynomial has no roots.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum CurveError {
    /// A curve parameter outside of `[0, 1]`, or NaN.
    #[error("parameter {0} is outside of the range [0, 1]")]
    ParameterOutOfBounds(f64),

    /// A control point count without a supported basis matrix.
    #[error("unsupported number of control points: {0}")]
    InvalidControlPointCount(usize),
}

/// Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Checks that `t` is a valid curve parameter.
#[inline]
pub(crate) fn check_param(t: f64) -> CurveResult<f64> {
    if (0.0..=1.0).contains(&t) {
        Ok(t)
    } else {
        Err(CurveError::ParameterOutOfBounds(t))
    }
}
