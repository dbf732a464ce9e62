//! Solution range, mean and total-variation reporting.

use std::fmt;

use crate::field::StateField;
use crate::grid::Grid1D;

/// Summary statistics of a state field.
///
/// `imin` and `imax` are flat entry indices (`cell * dof + component`),
/// first occurrence winning ties. The mean and the total-variation norm
/// are both normalized by the cell count, matching the convention of the
/// printed report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolutionStats {
    pub min: f64,
    pub max: f64,
    pub imin: usize,
    pub imax: usize,
    pub mean: f64,
    pub tv_norm: f64,
}

impl SolutionStats {
    /// Compute over the owned range of `x`.
    ///
    /// The total variation sums `|x[i] - x[i-1]|` over owned cells, which
    /// reads the ghost cell left of the owned range; ghosts must be
    /// populated before the call.
    pub fn compute(grid: &Grid1D, x: &StateField) -> Self {
        let dof = x.dof();
        let xs = grid.xs as isize;
        let xm = grid.xm as isize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut imin = 0;
        let mut imax = 0;
        let mut sum = 0.0;
        let mut tv = 0.0;
        for i in xs..(xs + xm) {
            let cur = x.cell(i);
            let prev = x.cell(i - 1);
            for j in 0..dof {
                let v = cur[j];
                let flat = i as usize * dof + j;
                if v < min {
                    min = v;
                    imin = flat;
                }
                if v > max {
                    max = v;
                    imax = flat;
                }
                sum += v;
                tv += (v - prev[j]).abs();
            }
        }
        let mx = grid.n_cells as f64;
        Self {
            min,
            max,
            imin,
            imax,
            mean: sum / mx,
            tv_norm: tv / mx,
        }
    }
}

impl fmt::Display for SolutionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Solution range [{:8.5},{:8.5}] with extrema at {} and {}, mean {:8.5}, ||x||_TV {:8.5}",
            self.min, self.max, self.imin, self.imax, self.mean, self.tv_norm
        )
    }
}
