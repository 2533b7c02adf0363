#![deny(warnings)]

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use curvegeom::*;

fn wavy_path(offset: Scalar) -> Path {
    Path::builder()
        .move_to((0.0, offset))
        .cubic_to((1.0, offset + 2.0), (2.0, offset - 2.0), (3.0, offset))
        .cubic_to((4.0, offset + 2.0), (5.0, offset - 2.0), (6.0, offset))
        .line_to((6.0, offset + 3.0))
        .line_to((0.0, offset + 3.0))
        .close()
        .build()
        .expect("path is not empty")
}

fn roots_benchmark(c: &mut Criterion) {
    let cubic = Bezier::cubic((0.0, -1.0), (1.0, -1.0), (1.0, 1.0), (0.0, 1.0));
    let quarter = EllipArc::from_endpoints((1.0, 0.0), (0.0, 1.0), 1.0, 1.0, 0.0, false, true, true)
        .expect("arc is feasible");

    let mut group = c.benchmark_group("roots");
    group
        .throughput(Throughput::Elements(1))
        .bench_function("cubic secant", |b| {
            b.iter(|| black_box(&cubic).roots(0.0, Axis::Y))
        })
        .bench_function("cubic chord", |b| {
            let ctrl: Vec<Point> = cubic.points().to_vec();
            let cfg = RootConfig {
                refine: Refine::Chord,
                ..RootConfig::default()
            };
            b.iter(|| {
                let mut out = CurveRoots::new();
                let w: Vec<Point> = ctrl
                    .iter()
                    .enumerate()
                    .map(|(i, p)| Point::new(i as Scalar / 3.0, p.y()))
                    .collect();
                find_parametric_roots(&w, &cfg, &mut out);
                out
            })
        })
        .bench_function("arc analytic", |b| {
            b.iter(|| black_box(&quarter).roots(0.5, Axis::Y))
        });
    group.finish();
}

fn crossings_benchmark(c: &mut Criterion) {
    let a = wavy_path(0.0);
    let b = wavy_path(1.5);

    let mut group = c.benchmark_group("crossings");
    group.throughput(Throughput::Elements(
        (a.segments().len() * b.segments().len()) as u64,
    ));
    group
        .bench_function("sweep", |bench| {
            bench.iter(|| path_crossings_with(black_box(&a), black_box(&b), Crosser::Sweep))
        })
        .bench_function("subdivide", |bench| {
            bench.iter(|| path_crossings_with(black_box(&a), black_box(&b), Crosser::Subdivide))
        })
        .bench_function("self", |bench| bench.iter(|| self_crossings(black_box(&a))));
    group.finish();
}

fn winding_benchmark(c: &mut Criterion) {
    let path = wavy_path(0.0);
    let inside = Point::new(3.0, 1.5);

    let mut group = c.benchmark_group("winding");
    group
        .throughput(Throughput::Elements(path.segments().len() as u64))
        .bench_function("winding", |b| b.iter(|| path.winding(black_box(inside))))
        .bench_function("contains", |b| {
            b.iter(|| path.contains(black_box(inside), FillRule::NonZero))
        });
    group.finish();
}

criterion_group!(
    benches,
    roots_benchmark,
    crossings_benchmark,
    winding_benchmark
);
criterion_main!(benches);
