//! Interface state construction and flux evaluation.
//!
//! An interface `i` separates cells `i - 1` and `i`. The MUSCL traces are
//!
//! uL = x[i-1] + slope[i-1] * hL / 2
//! uR = x[i]   - slope[i]   * hR / 2
//!
//! with hL and hR the widths of the cells on either side (equal on a
//! uniform grid, mixed at a two-region seam). The physics' Riemann solver
//! turns the trace pair into a numerical flux and the fastest wave speed.

use crate::error::FvResult;
use crate::field::StateField;
use crate::physics::Physics;

/// Call-scoped trace and flux buffers, sized by `dof`.
#[derive(Clone, Debug)]
pub struct FluxScratch {
    /// Left interface trace
    pub u_l: Vec<f64>,
    /// Right interface trace
    pub u_r: Vec<f64>,
    /// Numerical flux
    pub flux: Vec<f64>,
}

impl FluxScratch {
    pub fn new(dof: usize) -> Self {
        Self {
            u_l: vec![0.0; dof],
            u_r: vec![0.0; dof],
            flux: vec![0.0; dof],
        }
    }
}

/// Build the MUSCL trace pair at interface `i`.
pub fn muscl_states(
    x: &StateField,
    slope: &StateField,
    i: isize,
    h_left: f64,
    h_right: f64,
    scratch: &mut FluxScratch,
) {
    let dof = x.dof();
    let (xl, sl) = (x.cell(i - 1), slope.cell(i - 1));
    let (xr, sr) = (x.cell(i), slope.cell(i));
    for j in 0..dof {
        scratch.u_l[j] = xl[j] + sl[j] * h_left / 2.0;
        scratch.u_r[j] = xr[j] - sr[j] * h_right / 2.0;
    }
}

/// Trace, solve and return the signed maximum wave speed at interface `i`.
/// The flux is left in `scratch.flux`.
pub fn interface_flux<P: Physics + ?Sized>(
    physics: &P,
    x: &StateField,
    slope: &StateField,
    i: isize,
    h_left: f64,
    h_right: f64,
    scratch: &mut FluxScratch,
) -> FvResult<f64> {
    muscl_states(x, slope, i, h_left, h_right, scratch);
    physics.riemann(&scratch.u_l, &scratch.u_r, &mut scratch.flux)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BoundaryType, Grid1D};
    use crate::physics::Advection1D;

    const TOL: f64 = 1e-14;

    #[test]
    fn test_muscl_traces() {
        let grid = Grid1D::serial(0.0, 1.0, 4, BoundaryType::Periodic);
        let mut x = StateField::new(&grid, 1);
        let mut slope = StateField::new(&grid, 1);
        x.cell_mut(0)[0] = 1.0;
        x.cell_mut(1)[0] = 3.0;
        slope.cell_mut(0)[0] = 4.0;
        slope.cell_mut(1)[0] = -2.0;
        let mut scratch = FluxScratch::new(1);
        muscl_states(&x, &slope, 1, 0.25, 0.25, &mut scratch);
        // uL = 1 + 4 * 0.125, uR = 3 + 2 * 0.125.
        assert!((scratch.u_l[0] - 1.5).abs() < TOL);
        assert!((scratch.u_r[0] - 3.25).abs() < TOL);
    }

    #[test]
    fn test_mixed_widths_at_seam() {
        let grid = Grid1D::serial(0.0, 1.0, 4, BoundaryType::Periodic);
        let mut x = StateField::new(&grid, 1);
        let mut slope = StateField::new(&grid, 1);
        x.cell_mut(0)[0] = 2.0;
        slope.cell_mut(0)[0] = 1.0;
        slope.cell_mut(1)[0] = 1.0;
        let mut scratch = FluxScratch::new(1);
        muscl_states(&x, &slope, 1, 0.4, 0.1, &mut scratch);
        assert!((scratch.u_l[0] - 2.2).abs() < TOL);
        assert!((scratch.u_r[0] + 0.05).abs() < TOL);
    }

    #[test]
    fn test_interface_flux_upwinds() {
        let grid = Grid1D::serial(0.0, 1.0, 4, BoundaryType::Periodic);
        let physics = Advection1D::new(2.0);
        let mut x = StateField::new(&grid, 1);
        x.cell_mut(0)[0] = 5.0;
        x.cell_mut(1)[0] = -7.0;
        let slope = StateField::new(&grid, 1);
        let mut scratch = FluxScratch::new(1);
        let speed = interface_flux(&physics, &x, &slope, 1, 0.25, 0.25, &mut scratch).unwrap();
        assert!((scratch.flux[0] - 10.0).abs() < TOL, "a > 0 takes uL");
        assert!((speed - 2.0).abs() < TOL);
    }
}
