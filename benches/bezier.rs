// Copyright 2024 the bcurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks of the iterative curve queries.
//!
//! Run with: cargo bench --bench bezier

use std::hint::black_box;

use bcurve::{BezierCurve, Circle, Line, ParamCurveArclen, ParamCurveNearest, Point};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn curves() -> [(&'static str, BezierCurve); 3] {
    [
        (
            "quadratic",
            BezierCurve::quadratic((70.0, 250.0), (20.0, 110.0), (220.0, 60.0)),
        ),
        (
            "cubic",
            BezierCurve::cubic((110.0, 150.0), (25.0, 190.0), (210.0, 250.0), (210.0, 30.0)),
        ),
        (
            "cubic_loop",
            BezierCurve::cubic((176.0, 135.0), (45.0, 235.0), (220.0, 235.0), (98.0, 127.0)),
        ),
    ]
}

fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");
    for (name, curve) in &curves() {
        group.bench_with_input(BenchmarkId::new("arclen", name), curve, |b, curve| {
            b.iter(|| black_box(curve).arclen());
        });
        group.bench_with_input(BenchmarkId::new("bounding_box", name), curve, |b, curve| {
            b.iter(|| black_box(curve).bounding_box());
        });
        group.bench_with_input(BenchmarkId::new("nearest", name), curve, |b, curve| {
            b.iter(|| black_box(curve).nearest(black_box(Point::new(120.0, 160.0))));
        });
    }
    group.finish();
}

fn bench_intersect(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersect");
    let line = Line::new((15.0, 250.0), (220.0, 20.0));
    let circle = Circle::new((150.0, 150.0), 50.0);
    let [(_, quad), (_, cubic), (_, looped)] = curves();
    group.bench_function("line", |b| {
        b.iter(|| black_box(&cubic).line_intersections(black_box(line)));
    });
    group.bench_function("circle", |b| {
        b.iter(|| black_box(&cubic).circle_intersections(black_box(circle)));
    });
    group.bench_function("curve", |b| {
        b.iter(|| black_box(&cubic).curve_intersections(black_box(&quad)));
    });
    group.bench_function("self", |b| {
        b.iter(|| black_box(&looped).self_intersections());
    });
    group.finish();
}

fn bench_fit(c: &mut Criterion) {
    let curve = BezierCurve::cubic((52.0, 235.0), (56.0, 118.0), (204.0, 222.0), (179.0, 107.0));
    c.bench_function("find_arcs", |b| {
        b.iter(|| black_box(&curve).find_arcs(black_box(0.5)));
    });
}

criterion_group!(benches, bench_measure, bench_intersect, bench_fit);
criterion_main!(benches);
