//! Cell-average sampling of exact solutions.
//!
//! Initial data and reference solutions come from the physics' pointwise
//! [`Physics::sample`]; a finite-volume state stores cell *averages*, so
//! each cell integrates the pointwise profile with a composite trapezoid
//! rule. The two-region form places cell centers according to the
//! coarse/fine/coarse zone layout of [`Partition`].

use crate::error::FvResult;
use crate::field::CellField;
use crate::grid::Grid1D;
use crate::partition::Partition;
use crate::physics::Physics;

/// Trapezoid points per cell.
const N_QUAD: usize = 200;

/// Average the pointwise profile over one cell of width `h` centered at
/// `xi`.
fn cell_average<P: Physics + ?Sized>(
    physics: &P,
    grid: &Grid1D,
    profile: usize,
    time: f64,
    xi: f64,
    h: f64,
    point: &mut [f64],
    out: &mut [f64],
) -> FvResult<()> {
    out.fill(0.0);
    for j in 0..=N_QUAD {
        let xj = xi + h * (j as f64 - N_QUAD as f64 / 2.0) / N_QUAD as f64;
        physics.sample(
            profile,
            grid.boundary,
            grid.x_min,
            grid.x_max,
            time,
            xj,
            point,
        )?;
        let w = if j == 0 || j == N_QUAD { 0.5 } else { 1.0 };
        for k in 0..out.len() {
            out[k] += w * point[k] / N_QUAD as f64;
        }
    }
    Ok(())
}

/// Sample cell averages on a uniform grid; output covers the owned range.
pub fn sample_cell_averages<P: Physics + ?Sized>(
    physics: &P,
    grid: &Grid1D,
    profile: usize,
    time: f64,
) -> FvResult<CellField> {
    let dof = physics.dof();
    let h = grid.hx();
    let mut u = CellField::new(grid.xm, dof);
    let mut point = vec![0.0; dof];
    for i in 0..grid.xm {
        let xi = grid.x_min + h / 2.0 + (grid.xs + i) as f64 * h;
        let mut avg = vec![0.0; dof];
        cell_average(physics, grid, profile, time, xi, h, &mut point, &mut avg)?;
        u.cell_mut(i).copy_from_slice(&avg);
    }
    Ok(u)
}

/// Sample cell averages on the two-region layout.
///
/// The domain splits into three physical zones: a leading coarse quarter,
/// the fine half, and a trailing coarse quarter. Each cell's center and
/// quadrature width follow its zone.
pub fn sample_cell_averages_split<P: Physics + ?Sized>(
    physics: &P,
    grid: &Grid1D,
    partition: &Partition,
    profile: usize,
    time: f64,
) -> FvResult<CellField> {
    let dof = physics.dof();
    let length = grid.length();
    let hs = partition.hxs(grid);
    let hf = partition.hxf(grid);
    let seam_in = partition.seam_in();
    let n_fast = partition.n_fast;
    let mut u = CellField::new(grid.xm, dof);
    let mut point = vec![0.0; dof];
    for k in 0..grid.xm {
        let i = (grid.xs + k) as f64;
        let (xi, h) = if i * hs + 0.5 * hs < length * 0.25 {
            (grid.x_min + 0.5 * hs + i * hs, hs)
        } else if length * 0.25 + (i - seam_in as f64) * hf + 0.5 * hf < length * 0.75 {
            (
                grid.x_min + length * 0.25 + 0.5 * hf + (i - seam_in as f64) * hf,
                hf,
            )
        } else {
            (
                grid.x_min + length * 0.75 + 0.5 * hs + (i - (seam_in + n_fast) as f64) * hs,
                hs,
            )
        };
        let mut avg = vec![0.0; dof];
        cell_average(physics, grid, profile, time, xi, h, &mut point, &mut avg)?;
        u.cell_mut(k).copy_from_slice(&avg);
    }
    Ok(u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FvError;
    use crate::grid::BoundaryType;
    use crate::physics::{Advection1D, Physics};

    const TOL: f64 = 1e-12;

    /// Constant profile: the quadrature must reproduce it exactly since
    /// the trapezoid weights sum to one.
    struct Constant(f64);

    impl Physics for Constant {
        fn dof(&self) -> usize {
            1
        }
        fn characteristic(
            &self,
            _u: &[f64],
            r: &mut [f64],
            r_inv: &mut [f64],
            speeds: &mut [f64],
        ) -> FvResult<()> {
            r[0] = 1.0;
            r_inv[0] = 1.0;
            speeds[0] = 0.0;
            Ok(())
        }
        fn riemann(&self, _u_l: &[f64], _u_r: &[f64], flux: &mut [f64]) -> FvResult<f64> {
            flux[0] = 0.0;
            Ok(0.0)
        }
        fn sample(
            &self,
            _profile: usize,
            _boundary: BoundaryType,
            _x_min: f64,
            _x_max: f64,
            _time: f64,
            _x: f64,
            u: &mut [f64],
        ) -> FvResult<()> {
            u[0] = self.0;
            Ok(())
        }
    }

    #[test]
    fn test_constant_profile_round_trips() {
        let grid = Grid1D::serial(-1.0, 1.0, 7, BoundaryType::Periodic);
        let u = sample_cell_averages(&Constant(2.5), &grid, 0, 0.0).unwrap();
        for i in 0..7 {
            assert!(
                (u.cell(i)[0] - 2.5).abs() < TOL,
                "cell {i}: {}",
                u.cell(i)[0]
            );
        }
    }

    #[test]
    fn test_constant_profile_round_trips_split() {
        let grid = Grid1D::serial(0.0, 1.0, 12, BoundaryType::Periodic);
        let partition = Partition::for_grid(&grid, 2);
        let u = sample_cell_averages_split(&Constant(-0.75), &grid, &partition, 0, 0.0).unwrap();
        for i in 0..12 {
            assert!(
                (u.cell(i)[0] + 0.75).abs() < TOL,
                "cell {i}: {}",
                u.cell(i)[0]
            );
        }
    }

    #[test]
    fn test_sine_average_close_to_midpoint_value() {
        // A smooth profile's cell average differs from the center value by
        // (h^2/24) u'', which for sin(2 pi x) peaks near (pi^2/6) h^2.
        let grid = Grid1D::serial(0.0, 1.0, 50, BoundaryType::Periodic);
        let physics = Advection1D::new(1.0);
        let u = sample_cell_averages(&physics, &grid, 0, 0.0).unwrap();
        let h = grid.hx();
        let mut center = [0.0];
        for i in 0..50 {
            let xi = grid.x_min + h / 2.0 + i as f64 * h;
            physics
                .sample(0, grid.boundary, 0.0, 1.0, 0.0, xi, &mut center)
                .unwrap();
            assert!(
                (u.cell(i)[0] - center[0]).abs() < 2.0 * h * h,
                "cell {i}: average {} vs center {}",
                u.cell(i)[0],
                center[0]
            );
        }
    }

    #[test]
    fn test_missing_sample_capability_propagates() {
        struct NoSample;
        impl Physics for NoSample {
            fn dof(&self) -> usize {
                1
            }
            fn characteristic(
                &self,
                _u: &[f64],
                _r: &mut [f64],
                _r_inv: &mut [f64],
                _speeds: &mut [f64],
            ) -> FvResult<()> {
                Ok(())
            }
            fn riemann(&self, _u_l: &[f64], _u_r: &[f64], _flux: &mut [f64]) -> FvResult<f64> {
                Ok(0.0)
            }
        }
        let grid = Grid1D::serial(0.0, 1.0, 4, BoundaryType::Outflow);
        let err = sample_cell_averages(&NoSample, &grid, 0, 0.0).unwrap_err();
        assert!(matches!(err, FvError::MissingCapability("sampling")));
    }
}
