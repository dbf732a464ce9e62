//! Benchmarks for right-hand-side assembly.
//!
//! Run with: `cargo bench --bench rhs_bench`
//!
//! Measures the full and two-region assemblers across grid sizes for a
//! system (acoustics) and a scalar (advection) physics.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fv_rs::{
    compute_rhs, compute_rhs_split, Acoustics1D, Advection1D, BoundaryType, Grid1D, LimiterKind,
    Partition, Physics, StateField,
};

fn wavy_state<P: Physics>(physics: &P, grid: &Grid1D) -> StateField {
    let mut x = StateField::new(grid, physics.dof());
    for i in 0..grid.n_cells {
        let s = (i as f64 + 0.5) / grid.n_cells as f64;
        for j in 0..physics.dof() {
            x.cell_mut(i as isize)[j] = (6.28 * s + j as f64).sin();
        }
    }
    x.apply_periodic(grid);
    x
}

fn bench_full_assembler(c: &mut Criterion) {
    let mut group = c.benchmark_group("rhs_full");
    for &n in &[256usize, 1024, 4096] {
        let grid = Grid1D::serial(0.0, 1.0, n, BoundaryType::Periodic);

        let advection = Advection1D::new(1.0);
        group.bench_with_input(BenchmarkId::new("advection", n), &n, |b, _| {
            b.iter(|| {
                let mut x = wavy_state(&advection, &grid);
                compute_rhs(&advection, LimiterKind::Mc, &grid, black_box(&mut x)).unwrap()
            })
        });

        let acoustics = Acoustics1D::new(1.0, 1.5);
        group.bench_with_input(BenchmarkId::new("acoustics", n), &n, |b, _| {
            b.iter(|| {
                let mut x = wavy_state(&acoustics, &grid);
                compute_rhs(&acoustics, LimiterKind::Mc, &grid, black_box(&mut x)).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_split_assembler(c: &mut Criterion) {
    let mut group = c.benchmark_group("rhs_split");
    for &n in &[256usize, 1024, 4096] {
        let grid = Grid1D::serial(0.0, 1.0, n, BoundaryType::Periodic);
        let partition = Partition::for_grid(&grid, 4);
        let acoustics = Acoustics1D::new(1.0, 1.5);
        group.bench_with_input(BenchmarkId::new("acoustics", n), &n, |b, _| {
            b.iter(|| {
                let mut x = wavy_state(&acoustics, &grid);
                compute_rhs_split(
                    &acoustics,
                    LimiterKind::Mc,
                    &grid,
                    &partition,
                    black_box(&mut x),
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_assembler, bench_split_assembler);
criterion_main!(benches);
