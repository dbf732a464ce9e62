//! Characteristic MUSCL slope reconstruction.
//!
//! For each cell the jumps to its neighbors are projected into the
//! characteristic basis of the local flux Jacobian, limited wave family by
//! wave family, and projected back. Limiting decoupled scalar waves
//! instead of coupled vector components is what keeps systems like
//! acoustics oscillation-free at contact interfaces.
//!
//! Two forms exist, mirroring the two partition layouts: the uniform form
//! divides the limited jump by the cell width, the two-region form lets
//! [`LimiterKind::limit_split`] perform the per-interface normalization
//! and already returns slopes.

use crate::error::FvResult;
use crate::field::StateField;
use crate::grid::Grid1D;
use crate::limiter::{LimitInfo, LimiterKind};
use crate::partition::Partition;
use crate::physics::Physics;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Call-scoped scratch for one reconstruction pass.
///
/// Sized by `dof` at construction; assemblers create one per call so no
/// state leaks between invocations.
#[derive(Clone, Debug)]
pub struct ReconstructScratch {
    /// Right eigenvectors, column-major `dof * dof`
    pub r: Vec<f64>,
    /// Inverse eigenvector matrix, column-major `dof * dof`
    pub r_inv: Vec<f64>,
    /// Wave speeds
    pub speeds: Vec<f64>,
    /// Left jump in characteristic variables
    pub cjmp_l: Vec<f64>,
    /// Right jump in characteristic variables
    pub cjmp_r: Vec<f64>,
    /// Limited characteristic slope
    pub cslope: Vec<f64>,
}

impl ReconstructScratch {
    pub fn new(dof: usize) -> Self {
        Self {
            r: vec![0.0; dof * dof],
            r_inv: vec![0.0; dof * dof],
            speeds: vec![0.0; dof],
            cjmp_l: vec![0.0; dof],
            cjmp_r: vec![0.0; dof],
            cslope: vec![0.0; dof],
        }
    }
}

/// Decompose at cell `i` and project the neighbor jumps into the
/// characteristic basis.
fn characteristic_jumps<P: Physics + ?Sized>(
    physics: &P,
    x: &StateField,
    i: isize,
    scratch: &mut ReconstructScratch,
) -> FvResult<()> {
    let dof = physics.dof();
    physics.characteristic(
        x.cell(i),
        &mut scratch.r,
        &mut scratch.r_inv,
        &mut scratch.speeds,
    )?;
    scratch.cjmp_l.fill(0.0);
    scratch.cjmp_r.fill(0.0);
    for j in 0..dof {
        let jmp_l = x.cell(i)[j] - x.cell(i - 1)[j];
        let jmp_r = x.cell(i + 1)[j] - x.cell(i)[j];
        for k in 0..dof {
            scratch.cjmp_l[k] += scratch.r_inv[k + j * dof] * jmp_l;
            scratch.cjmp_r[k] += scratch.r_inv[k + j * dof] * jmp_r;
        }
    }
    Ok(())
}

/// Project the limited characteristic slope back to conserved variables.
fn project_back(scratch: &ReconstructScratch, dof: usize, out: &mut [f64]) {
    for j in 0..dof {
        let mut tmp = 0.0;
        for k in 0..dof {
            tmp += scratch.r[j + k * dof] * scratch.cslope[k];
        }
        out[j] = tmp;
    }
}

/// Compute uniform-spacing limited slopes for the cells `xs - 1 ..= xs + xm`
/// selected by `keep`. Cells in the range that `keep` rejects are zeroed,
/// so a later one-sided flux evaluation sees a flat reconstruction there.
pub fn reconstruct_slopes<P, F>(
    physics: &P,
    limiter: LimiterKind,
    grid: &Grid1D,
    x: &StateField,
    slope: &mut StateField,
    scratch: &mut ReconstructScratch,
    keep: F,
) -> FvResult<()>
where
    P: Physics + ?Sized,
    F: Fn(isize) -> bool,
{
    let dof = physics.dof();
    let hx = grid.hx();
    let info = LimitInfo { hx };
    let xs = grid.xs as isize;
    let xm = grid.xm as isize;
    for i in (xs - 1)..=(xs + xm) {
        if !keep(i) {
            slope.cell_mut(i).fill(0.0);
            continue;
        }
        characteristic_jumps(physics, x, i, scratch)?;
        limiter.limit(&info, &scratch.cjmp_l, &scratch.cjmp_r, &mut scratch.cslope);
        for s in scratch.cslope.iter_mut() {
            *s /= hx;
        }
        project_back(scratch, dof, slope.cell_mut(i));
    }
    Ok(())
}

/// Two-region counterpart of [`reconstruct_slopes`]: jumps are normalized
/// per interface by the partition-aware limiter, so no division by a cell
/// width happens here.
pub fn reconstruct_slopes_split<P, F>(
    physics: &P,
    limiter: LimiterKind,
    partition: &Partition,
    grid: &Grid1D,
    x: &StateField,
    slope: &mut StateField,
    scratch: &mut ReconstructScratch,
    keep: F,
) -> FvResult<()>
where
    P: Physics + ?Sized,
    F: Fn(isize) -> bool,
{
    let dof = physics.dof();
    let hxs = partition.hxs(grid);
    let hxf = partition.hxf(grid);
    let xs = grid.xs as isize;
    let xm = grid.xm as isize;
    for i in (xs - 1)..=(xs + xm) {
        if !keep(i) {
            slope.cell_mut(i).fill(0.0);
            continue;
        }
        characteristic_jumps(physics, x, i, scratch)?;
        limiter.limit_split(
            partition,
            hxs,
            hxf,
            i,
            &scratch.cjmp_l,
            &scratch.cjmp_r,
            &mut scratch.cslope,
        )?;
        project_back(scratch, dof, slope.cell_mut(i));
    }
    Ok(())
}

/// Parallel uniform reconstruction; produces the same slopes as
/// [`reconstruct_slopes`], cell by cell.
///
/// Cells are independent once the state ghosts are in place, so the slope
/// storage is chunked per cell across the rayon pool with a scratch per
/// worker.
#[cfg(feature = "parallel")]
pub fn reconstruct_slopes_parallel<P, F>(
    physics: &P,
    limiter: LimiterKind,
    grid: &Grid1D,
    x: &StateField,
    slope: &mut StateField,
    keep: F,
) -> FvResult<()>
where
    P: Physics + ?Sized + Sync,
    F: Fn(isize) -> bool + Sync,
{
    let dof = physics.dof();
    let hx = grid.hx();
    let info = LimitInfo { hx };
    let xs = grid.xs as isize;
    let xm = grid.xm as isize;
    let first = slope.first_index();
    slope
        .data_mut()
        .par_chunks_mut(dof)
        .enumerate()
        .try_for_each_init(
            || ReconstructScratch::new(dof),
            |scratch, (c, out)| {
                let i = first + c as isize;
                if i < xs - 1 || i > xs + xm || !keep(i) {
                    out.fill(0.0);
                    return Ok(());
                }
                characteristic_jumps(physics, x, i, scratch)?;
                limiter.limit(&info, &scratch.cjmp_l, &scratch.cjmp_r, &mut scratch.cslope);
                for s in scratch.cslope.iter_mut() {
                    *s /= hx;
                }
                project_back(scratch, dof, out);
                Ok(())
            },
        )
}
