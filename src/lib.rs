// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D Bezier curves of degree 1 to 3.
//!
//! The bcurve library evaluates, measures and intersects linear, quadratic
//! and cubic Bezier curves. It covers point, tangent and curvature
//! evaluation, arc length, subdivision, extrema and bounding boxes,
//! intersections with lines, circles and other curves, self-intersections,
//! approximation by circular arcs and nearest-point projection.
//!
//! # Examples
//!
//! Evaluating and measuring a curve:
//! ```
//! use bcurve::{BezierCurve, ParamCurve, ParamCurveArclen, Point};
//!
//! let curve = BezierCurve::quadratic((0.0, 0.0), (50.0, 100.0), (100.0, 0.0));
//! assert_eq!(curve.eval(0.5).unwrap(), Point::new(50.0, 50.0));
//! assert!(curve.eval(1.5).is_err());
//!
//! let length = curve.arclen();
//! assert!(length > 100.0 && length < 200.0);
//!
//! let bbox = curve.bounding_box();
//! assert_eq!((bbox.y0, bbox.y1), (0.0, 50.0));
//! ```
//!
//! Intersecting with a line segment:
//! ```
//! use bcurve::{BezierCurve, Line, ParamCurve};
//!
//! let curve = BezierCurve::quadratic((70.0, 250.0), (20.0, 110.0), (220.0, 60.0));
//! let hits = curve.line_intersections(Line::new((15.0, 250.0), (220.0, 20.0)));
//! assert_eq!(hits.len(), 2);
//! for hit in &hits {
//!     assert_eq!(curve.eval(hit.curve_t).unwrap(), hit.point);
//!     assert!((0.0..=1.0).contains(&hit.line_t));
//! }
//! ```
//!
//! Parameters are always in `[0, 1]`. Anything else, NaN included, is
//! rejected with [`CurveError::ParameterOutOfBounds`] rather than clamped.
//!
//! # Features
//!
//! The following crate [feature flags](https://doc.rust-lang.org/cargo/reference/features.html#dependency-features) are available:
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//!   This is useful for `no_std` environments.
//!   However, note that the `libm` crate is not as efficient as the standard library.
//! - `mint`: Enable `From`/`Into` conversion of bcurve and [mint][] types, enabling interoperability
//!   with other graphics libraries.
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//! Note that bcurve does require that an allocator is available (i.e. it uses [alloc]).
//!
//! The iterative queries report progress through [tracing][] at `debug` and
//! `trace` level; no subscriber is installed by this crate.
//!
//! [libm]: https://docs.rs/libm
//! [mint]: https://docs.rs/mint
//! [tracing]: https://docs.rs/tracing

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
#![allow(
    clippy::use_self,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::missing_assert_message,
    clippy::missing_errors_doc,
    clippy::exhaustive_enums,
    clippy::unseparated_literal_suffix,
    clippy::wildcard_imports,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("bcurve requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

mod affine;
mod arc;
mod arclen;
mod bezier;
mod circle;
pub mod common;
mod error;
mod extrema;
mod fit;
mod intersect;
mod line;
mod nearest;
mod opts;
mod param_curve;
mod point;
mod rect;
mod vec2;

pub use crate::affine::*;
pub use crate::arc::*;
pub use crate::arclen::*;
pub use crate::bezier::{power_coefficients, BezierCurve, Coefficients, Degree, MAX_CONTROL_POINTS};
pub use crate::circle::*;
pub use crate::error::{CurveError, CurveResult};
pub use crate::extrema::*;
pub use crate::fit::*;
pub use crate::intersect::*;
pub use crate::line::*;
pub use crate::opts::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::rect::*;
pub use crate::vec2::*;
