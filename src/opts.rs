// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerances and limits of the iterative curve queries.

/// Tolerances and limits for intersection search and projection.
///
/// The defaults suit curves with coordinates in the tens to thousands of
/// units. Every query that depends on these has a `*_with` variant taking
/// options; the plain variant uses [`CurveOpts::default`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveOpts {
    /// Sub-curves shorter than this (in arc length) are considered
    /// converged by the intersection search.
    pub length_tolerance: f64,
    /// Intersections whose parameters on the first curve are closer than
    /// this are reported once.
    pub dedup_epsilon: f64,
    /// Upper bound on the number of sub-curve pairs the intersection
    /// search examines.
    pub max_pairs: usize,
    /// Number of intervals of the look-up table seeding the projection.
    pub projection_steps: usize,
    /// The projection stops refining once its bracket is narrower than this.
    ///
    /// Values below `f64::EPSILON`, NaN included, act as `f64::EPSILON`.
    pub projection_tolerance: f64,
}

impl Default for CurveOpts {
    fn default() -> Self {
        Self {
            length_tolerance: 1e-4,
            dedup_epsilon: 5e-6,
            max_pairs: 1 << 16,
            projection_steps: 500,
            projection_tolerance: 1e-5,
        }
    }
}

impl CurveOpts {
    /// Builder method for setting the convergence length of the intersection search.
    pub fn with_length_tolerance(mut self, tolerance: f64) -> Self {
        self.length_tolerance = tolerance;
        self
    }

    /// Builder method for setting the deduplication epsilon.
    pub fn with_dedup_epsilon(mut self, epsilon: f64) -> Self {
        self.dedup_epsilon = epsilon;
        self
    }

    /// Builder method for setting the work limit of the intersection search.
    pub fn with_max_pairs(mut self, max_pairs: usize) -> Self {
        self.max_pairs = max_pairs;
        self
    }

    /// Builder method for setting the projection look-up table resolution.
    ///
    /// Zero is treated as one.
    pub fn with_projection_steps(mut self, steps: usize) -> Self {
        self.projection_steps = steps.max(1);
        self
    }

    /// Builder method for setting the projection bracket tolerance.
    ///
    /// The tolerance is raised to at least `f64::EPSILON`.
    pub fn with_projection_tolerance(mut self, tolerance: f64) -> Self {
        self.projection_tolerance = tolerance.max(f64::EPSILON);
        self
    }
}
