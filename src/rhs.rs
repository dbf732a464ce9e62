//! Right-hand-side assembly.
//!
//! Each assembler turns a ghost-populated state field into the discrete
//! time derivative of the cell averages, in one of three shapes per
//! spacing layout:
//!
//! - full: every owned cell, output length `xm`, locally indexed;
//! - slow-only: the coarse subset, compacted to length `n_slow`;
//! - fast-only: the fine subset, compacted to length `n_fast`.
//!
//! The `*_split` variants use the two-region coarse/fine/coarse layout
//! with distinct spacings; the plain variants use uniform spacing with the
//! slow cells as an index prefix. Every assembler returns the local CFL
//! bound max |s|/h accumulated over the interfaces it visited.
//!
//! Restricted assemblers deposit one-sidedly at the seams: the transition
//! flux is applied only to the cell on the assembler's own side, its
//! mirror image being the other assembler's responsibility. Concatenating
//! the slow and fast outputs in domain order reproduces the full
//! assembler's result exactly.

use crate::cfl::CflTracker;
use crate::error::FvResult;
use crate::field::{CellField, StateField};
use crate::flux::{interface_flux, FluxScratch};
use crate::grid::Grid1D;
use crate::limiter::LimiterKind;
use crate::partition::{InterfacePosition, Partition};
use crate::physics::Physics;
use crate::reconstruct::{reconstruct_slopes, reconstruct_slopes_split, ReconstructScratch};

/// Assembled right-hand side plus the local CFL bound.
#[derive(Clone, Debug)]
pub struct RhsResult {
    /// Time derivative of the cell averages; full-length or compacted
    /// depending on the assembler.
    pub f: CellField,
    /// max |speed| / h over the visited interfaces.
    pub cfl_bound: f64,
}

/// Accumulate `sign * flux / h` into cell `k`.
#[inline]
fn deposit(f: &mut CellField, k: usize, flux: &[f64], h: f64, sign: f64) {
    let cell = f.cell_mut(k);
    for j in 0..flux.len() {
        cell[j] += sign * flux[j] / h;
    }
}

/// Flux sweep over all owned interfaces on a uniform grid, shared by the
/// serial and parallel full assemblers.
fn full_flux_sweep<P: Physics + ?Sized>(
    physics: &P,
    grid: &Grid1D,
    x: &StateField,
    slope: &StateField,
) -> FvResult<RhsResult> {
    let dof = physics.dof();
    let hx = grid.hx();
    let xs = grid.xs as isize;
    let xm = grid.xm as isize;
    let mut f = CellField::new(grid.xm, dof);
    let mut cfl = CflTracker::new();
    let mut fs = FluxScratch::new(dof);
    for i in xs..=(xs + xm) {
        let speed = interface_flux(physics, x, slope, i, hx, hx, &mut fs)?;
        cfl.observe(speed, hx);
        if i > xs {
            deposit(&mut f, (i - 1 - xs) as usize, &fs.flux, hx, -1.0);
        }
        if i < xs + xm {
            deposit(&mut f, (i - xs) as usize, &fs.flux, hx, 1.0);
        }
    }
    Ok(RhsResult {
        f,
        cfl_bound: cfl.bound(),
    })
}

/// Assemble the full right-hand side on a uniform grid.
pub fn compute_rhs<P: Physics + ?Sized>(
    physics: &P,
    limiter: LimiterKind,
    grid: &Grid1D,
    x: &mut StateField,
) -> FvResult<RhsResult> {
    let dof = physics.dof();
    x.apply_outflow(grid);
    let mut slope = StateField::new(grid, dof);
    let mut scratch = ReconstructScratch::new(dof);
    reconstruct_slopes(physics, limiter, grid, x, &mut slope, &mut scratch, |_| true)?;
    full_flux_sweep(physics, grid, x, &slope)
}

/// Full assembler with the reconstruction stage on the rayon pool.
///
/// The flux accumulation stays serial, so the result is bit-identical to
/// [`compute_rhs`].
#[cfg(feature = "parallel")]
pub fn compute_rhs_parallel<P: Physics + ?Sized + Sync>(
    physics: &P,
    limiter: LimiterKind,
    grid: &Grid1D,
    x: &mut StateField,
) -> FvResult<RhsResult> {
    use crate::reconstruct::reconstruct_slopes_parallel;
    let dof = physics.dof();
    x.apply_outflow(grid);
    let mut slope = StateField::new(grid, dof);
    reconstruct_slopes_parallel(physics, limiter, grid, x, &mut slope, |_| true)?;
    full_flux_sweep(physics, grid, x, &slope)
}

/// Assemble the slow-subset right-hand side on a uniform grid.
///
/// The slow cells are the index prefix `0..n_slow`; the output has length
/// `n_slow`. The transition interface `n_slow` contributes one-sidedly to
/// the last slow cell, with the trace built from the same slopes the full
/// assembler would use.
pub fn compute_rhs_slow<P: Physics + ?Sized>(
    physics: &P,
    limiter: LimiterKind,
    grid: &Grid1D,
    partition: &Partition,
    x: &mut StateField,
) -> FvResult<RhsResult> {
    let dof = physics.dof();
    let n_slow = partition.n_slow as isize;
    x.apply_outflow(grid);
    let mut slope = StateField::new(grid, dof);
    let mut scratch = ReconstructScratch::new(dof);
    reconstruct_slopes(physics, limiter, grid, x, &mut slope, &mut scratch, |i| {
        i < n_slow + 1
    })?;
    let hx = grid.hx();
    let xs = grid.xs as isize;
    let xm = grid.xm as isize;
    let mut f = CellField::new(partition.n_slow, dof);
    let mut cfl = CflTracker::new();
    let mut fs = FluxScratch::new(dof);
    for i in xs..=(xs + xm) {
        if i < n_slow {
            let speed = interface_flux(physics, x, &slope, i, hx, hx, &mut fs)?;
            cfl.observe(speed, hx);
            if i > xs {
                deposit(&mut f, (i - 1) as usize, &fs.flux, hx, -1.0);
            }
            if i < xs + xm {
                deposit(&mut f, i as usize, &fs.flux, hx, 1.0);
            }
        } else if i == n_slow {
            let speed = interface_flux(physics, x, &slope, i, hx, hx, &mut fs)?;
            cfl.observe(speed, hx);
            if i > xs {
                deposit(&mut f, (i - 1) as usize, &fs.flux, hx, -1.0);
            }
        }
    }
    Ok(RhsResult {
        f,
        cfl_bound: cfl.bound(),
    })
}

/// Assemble the fast-subset right-hand side on a uniform grid.
///
/// The fast cells are `n_slow..n_cells`, re-indexed from zero in the
/// output. The transition interface contributes one-sidedly to the first
/// fast cell.
pub fn compute_rhs_fast<P: Physics + ?Sized>(
    physics: &P,
    limiter: LimiterKind,
    grid: &Grid1D,
    partition: &Partition,
    x: &mut StateField,
) -> FvResult<RhsResult> {
    let dof = physics.dof();
    let n_slow = partition.n_slow as isize;
    x.apply_outflow(grid);
    let mut slope = StateField::new(grid, dof);
    let mut scratch = ReconstructScratch::new(dof);
    reconstruct_slopes(physics, limiter, grid, x, &mut slope, &mut scratch, |i| {
        i > n_slow - 2
    })?;
    let hx = grid.hx();
    let xs = grid.xs as isize;
    let xm = grid.xm as isize;
    let mut f = CellField::new(partition.n_fast, dof);
    let mut cfl = CflTracker::new();
    let mut fs = FluxScratch::new(dof);
    for i in xs..=(xs + xm) {
        if i > n_slow {
            let speed = interface_flux(physics, x, &slope, i, hx, hx, &mut fs)?;
            cfl.observe(speed, hx);
            if i > xs {
                deposit(&mut f, (i - n_slow - 1) as usize, &fs.flux, hx, -1.0);
            }
            if i < xs + xm {
                deposit(&mut f, (i - n_slow) as usize, &fs.flux, hx, 1.0);
            }
        } else if i == n_slow {
            let speed = interface_flux(physics, x, &slope, i, hx, hx, &mut fs)?;
            cfl.observe(speed, hx);
            if i < xs + xm {
                deposit(&mut f, (i - n_slow) as usize, &fs.flux, hx, 1.0);
            }
        }
    }
    Ok(RhsResult {
        f,
        cfl_bound: cfl.bound(),
    })
}

/// Assemble the full right-hand side on the two-region layout.
///
/// Cell widths are `hxs` in the coarse zones and `hxf` in the fine zone;
/// at the two seams each trace uses its own side's half-width and each
/// deposit its own side's spacing.
pub fn compute_rhs_split<P: Physics + ?Sized>(
    physics: &P,
    limiter: LimiterKind,
    grid: &Grid1D,
    partition: &Partition,
    x: &mut StateField,
) -> FvResult<RhsResult> {
    let dof = physics.dof();
    let hxs = partition.hxs(grid);
    let hxf = partition.hxf(grid);
    x.apply_outflow(grid);
    let mut slope = StateField::new(grid, dof);
    let mut scratch = ReconstructScratch::new(dof);
    reconstruct_slopes_split(
        physics,
        limiter,
        partition,
        grid,
        x,
        &mut slope,
        &mut scratch,
        |_| true,
    )?;
    let xs = grid.xs as isize;
    let xm = grid.xm as isize;
    let mut f = CellField::new(grid.xm, dof);
    let mut cfl = CflTracker::new();
    let mut fs = FluxScratch::new(dof);
    for i in xs..=(xs + xm) {
        let pos = InterfacePosition::classify(i, partition);
        let hl = pos.left_width(hxs, hxf);
        let hr = pos.right_width(hxs, hxf);
        let speed = interface_flux(physics, x, &slope, i, hl, hr, &mut fs)?;
        cfl.observe(speed, pos.spacing(hxs, hxf));
        if i > xs {
            deposit(&mut f, (i - 1 - xs) as usize, &fs.flux, hl, -1.0);
        }
        if i < xs + xm {
            deposit(&mut f, (i - xs) as usize, &fs.flux, hr, 1.0);
        }
    }
    Ok(RhsResult {
        f,
        cfl_bound: cfl.bound(),
    })
}

/// Assemble the slow-subset right-hand side on the two-region layout.
///
/// Output length `n_slow`, covering the leading coarse cells followed by
/// the trailing coarse cells in domain order. A running output index
/// tracks the compaction; at each seam only the coarse-side cell receives
/// the transition flux.
pub fn compute_rhs_slow_split<P: Physics + ?Sized>(
    physics: &P,
    limiter: LimiterKind,
    grid: &Grid1D,
    partition: &Partition,
    x: &mut StateField,
) -> FvResult<RhsResult> {
    let dof = physics.dof();
    let hxs = partition.hxs(grid);
    let hxf = partition.hxf(grid);
    let si = partition.seam_in() as isize;
    let so = partition.seam_out() as isize;
    x.apply_outflow(grid);
    let mut slope = StateField::new(grid, dof);
    let mut scratch = ReconstructScratch::new(dof);
    reconstruct_slopes_split(
        physics,
        limiter,
        partition,
        grid,
        x,
        &mut slope,
        &mut scratch,
        |i| i <= si || i >= so - 1,
    )?;
    let xs = grid.xs as isize;
    let xm = grid.xm as isize;
    let mut f = CellField::new(partition.n_slow, dof);
    let mut cfl = CflTracker::new();
    let mut fs = FluxScratch::new(dof);
    let mut islow = 0usize;
    for i in xs..=(xs + xm) {
        if i < si {
            let speed = interface_flux(physics, x, &slope, i, hxs, hxs, &mut fs)?;
            cfl.observe(speed, hxs);
            if i > xs {
                deposit(&mut f, islow - 1, &fs.flux, hxs, -1.0);
            }
            if i < xs + xm {
                deposit(&mut f, islow, &fs.flux, hxs, 1.0);
                islow += 1;
            }
        } else if i == si {
            let speed = interface_flux(physics, x, &slope, i, hxs, hxf, &mut fs)?;
            cfl.observe(speed, 0.5 * (hxs + hxf));
            if i > xs {
                deposit(&mut f, islow - 1, &fs.flux, hxs, -1.0);
            }
        } else if i == so {
            let speed = interface_flux(physics, x, &slope, i, hxf, hxs, &mut fs)?;
            cfl.observe(speed, 0.5 * (hxs + hxf));
            if i < xs + xm {
                deposit(&mut f, islow, &fs.flux, hxs, 1.0);
                islow += 1;
            }
        } else if i > so {
            let speed = interface_flux(physics, x, &slope, i, hxs, hxs, &mut fs)?;
            cfl.observe(speed, hxs);
            if i > xs {
                deposit(&mut f, islow - 1, &fs.flux, hxs, -1.0);
            }
            if i < xs + xm {
                deposit(&mut f, islow, &fs.flux, hxs, 1.0);
                islow += 1;
            }
        }
    }
    Ok(RhsResult {
        f,
        cfl_bound: cfl.bound(),
    })
}

/// Assemble the fast-subset right-hand side on the two-region layout.
///
/// Output length `n_fast`, re-indexed from zero at the first fine cell.
/// Each seam contributes one-sidedly to the fine-side cell.
pub fn compute_rhs_fast_split<P: Physics + ?Sized>(
    physics: &P,
    limiter: LimiterKind,
    grid: &Grid1D,
    partition: &Partition,
    x: &mut StateField,
) -> FvResult<RhsResult> {
    let dof = physics.dof();
    let hxs = partition.hxs(grid);
    let hxf = partition.hxf(grid);
    let si = partition.seam_in() as isize;
    let so = partition.seam_out() as isize;
    x.apply_outflow(grid);
    let mut slope = StateField::new(grid, dof);
    let mut scratch = ReconstructScratch::new(dof);
    reconstruct_slopes_split(
        physics,
        limiter,
        partition,
        grid,
        x,
        &mut slope,
        &mut scratch,
        |i| i > si - 2 && i <= so,
    )?;
    let xs = grid.xs as isize;
    let xm = grid.xm as isize;
    let mut f = CellField::new(partition.n_fast, dof);
    let mut cfl = CflTracker::new();
    let mut fs = FluxScratch::new(dof);
    let mut ifast = 0usize;
    for i in xs..=(xs + xm) {
        if i == si {
            let speed = interface_flux(physics, x, &slope, i, hxs, hxf, &mut fs)?;
            cfl.observe(speed, 0.5 * (hxs + hxf));
            if i < xs + xm {
                deposit(&mut f, ifast, &fs.flux, hxf, 1.0);
                ifast += 1;
            }
        } else if i > si && i < so {
            let speed = interface_flux(physics, x, &slope, i, hxf, hxf, &mut fs)?;
            cfl.observe(speed, hxf);
            if i > xs {
                deposit(&mut f, ifast - 1, &fs.flux, hxf, -1.0);
            }
            if i < xs + xm {
                deposit(&mut f, ifast, &fs.flux, hxf, 1.0);
                ifast += 1;
            }
        } else if i == so {
            let speed = interface_flux(physics, x, &slope, i, hxf, hxs, &mut fs)?;
            cfl.observe(speed, 0.5 * (hxs + hxf));
            if i > xs {
                deposit(&mut f, ifast - 1, &fs.flux, hxf, -1.0);
            }
        }
    }
    Ok(RhsResult {
        f,
        cfl_bound: cfl.bound(),
    })
}
