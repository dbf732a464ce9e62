//! Physics capability contract for conservation laws.
//!
//! The solver core is parameterized by a [`Physics`] implementation that
//! supplies everything specific to one conservation law:
//!
//! - the characteristic decomposition used to limit decoupled wave
//!   families instead of coupled vector components,
//! - a Riemann solver producing the interface flux and the fastest wave
//!   speed, and
//! - optionally, exact-solution sampling for initialization and error
//!   measurement.
//!
//! Production physics live outside this crate; [`Advection1D`] and
//! [`Acoustics1D`] are reference implementations exercised by the tests
//! and benches.

mod acoustics;
mod advection;

pub use acoustics::{Acoustics1D, AcousticsRiemann};
pub use advection::{Advection1D, AdvectionRiemann};

use crate::error::{FvError, FvResult};
use crate::grid::BoundaryType;

/// A conservation law as seen by the finite-volume core.
///
/// `dof()` is fixed for the lifetime of a value. Eigenvector matrices use
/// column-major storage: `r[j + k * dof]` is component `j` of the k-th
/// right eigenvector, and `r_inv[k + j * dof]` is entry `(k, j)` of its
/// inverse, so characteristic projection accumulates
/// `w[k] += r_inv[k + j * dof] * q[j]`.
pub trait Physics: Send + Sync {
    /// Number of conserved components per cell.
    fn dof(&self) -> usize;

    /// Eigen-decomposition `A = R Λ R⁻¹` of the flux Jacobian at state `u`.
    ///
    /// Writes the right eigenvectors into `r`, their inverse into `r_inv`
    /// (both `dof * dof`, column-major) and the wave speeds into `speeds`.
    fn characteristic(
        &self,
        u: &[f64],
        r: &mut [f64],
        r_inv: &mut [f64],
        speeds: &mut [f64],
    ) -> FvResult<()>;

    /// Interface flux between left and right states.
    ///
    /// Writes the flux into `flux` and returns the maximum wave speed
    /// crossing the interface (sign preserved; callers take the absolute
    /// value for CFL purposes).
    fn riemann(&self, u_l: &[f64], u_r: &[f64], flux: &mut [f64]) -> FvResult<f64>;

    /// Sample the exact (or initial) solution at position `x`, time `time`.
    ///
    /// `profile` selects among the physics' initial profiles. The default
    /// implementation reports the missing capability.
    fn sample(
        &self,
        profile: usize,
        boundary: BoundaryType,
        x_min: f64,
        x_max: f64,
        time: f64,
        x: f64,
        u: &mut [f64],
    ) -> FvResult<()> {
        let _ = (profile, boundary, x_min, x_max, time, x, u);
        Err(FvError::MissingCapability("sampling"))
    }
}

/// Wrap `x` into `[x_min, x_max)` by periodic translation.
pub(crate) fn range_mod(x: f64, x_min: f64, x_max: f64) -> f64 {
    let range = x_max - x_min;
    x_min + (x - x_min).rem_euclid(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FluxOnly;

    impl Physics for FluxOnly {
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
    }

    #[test]
    fn test_default_sample_reports_missing_capability() {
        let physics = FluxOnly;
        let mut u = [0.0];
        let err = physics
            .sample(0, BoundaryType::Outflow, 0.0, 1.0, 0.0, 0.5, &mut u)
            .unwrap_err();
        assert!(matches!(err, FvError::MissingCapability("sampling")));
    }

    #[test]
    fn test_range_mod() {
        assert!((range_mod(1.25, 0.0, 1.0) - 0.25).abs() < 1e-15);
        assert!((range_mod(-0.25, 0.0, 1.0) - 0.75).abs() < 1e-15);
        assert!((range_mod(0.5, 0.0, 1.0) - 0.5).abs() < 1e-15);
        assert!((range_mod(-3.5, -1.0, 1.0) - 0.5).abs() < 1e-15);
    }
}
