//! Benchmarks for slope limiters.
//!
//! Run with: `cargo bench --bench limiter_bench`
//!
//! Compares the per-evaluation cost of the limiter family on a stream of
//! characteristic jump pairs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fv_rs::{LimitInfo, LimiterKind, ALL_LIMITERS};

/// Generate jump pairs with mixed signs and magnitudes.
fn generate_jumps(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let phase = i as f64 * 0.1;
            (phase.sin(), (phase + 0.4).cos() * 1.5)
        })
        .collect()
}

fn bench_limiters(c: &mut Criterion) {
    let jumps = generate_jumps(1024);
    let info = LimitInfo { hx: 0.01 };
    let mut group = c.benchmark_group("limiter");
    for kind in ALL_LIMITERS {
        group.bench_with_input(BenchmarkId::from_parameter(kind.name()), &kind, |b, k| {
            b.iter(|| {
                let mut out = [0.0];
                let mut acc = 0.0;
                for &(l, r) in &jumps {
                    k.limit(&info, black_box(&[l]), black_box(&[r]), &mut out);
                    acc += out[0];
                }
                acc
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_limiters);
criterion_main!(benches);
