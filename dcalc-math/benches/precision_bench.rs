use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dcalc_math::{add, multiply, round};

fn scaled_arithmetic_benchmark(c: &mut Criterion) {
    c.bench_function("scaled add", |b| {
        b.iter(|| add(black_box(0.1), black_box(0.2)))
    });

    c.bench_function("scaled multiply", |b| {
        b.iter(|| multiply(black_box(1.25), black_box(3.004)))
    });

    c.bench_function("round to 2 places", |b| {
        b.iter(|| round(black_box(1234.56789), 2))
    });

    c.bench_function("native f64 add (baseline)", |b| {
        b.iter(|| black_box(0.1) + black_box(0.2))
    });
}

criterion_group!(benches, scaled_arithmetic_benchmark);
criterion_main!(benches);
