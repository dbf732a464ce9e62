//! Linear advection physics.
//!
//! The 1D linear advection equation:
//!
//! ∂u/∂t + a ∂u/∂x = 0
//!
//! with constant velocity a. The simplest hyperbolic conservation law:
//! the characteristic basis is the identity and the Riemann problem has
//! the exact upwind solution u(x - a t).

use std::f64::consts::PI;

use super::{range_mod, Physics};
use crate::error::{FvError, FvResult};
use crate::grid::BoundaryType;

/// Riemann solver selection for [`Advection1D`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdvectionRiemann {
    /// Exact upwind flux
    #[default]
    Upwind,
    /// Local Lax-Friedrichs; more diffusive, useful for comparisons
    Rusanov,
}

impl AdvectionRiemann {
    /// Look a solver up by its registry name.
    pub fn from_name(name: &str) -> FvResult<Self> {
        match name {
            "upwind" => Ok(Self::Upwind),
            "rusanov" => Ok(Self::Rusanov),
            other => Err(FvError::UnknownRiemannSolver(other.to_string())),
        }
    }
}

/// 1D linear advection with a selectable interface flux.
#[derive(Clone, Debug)]
pub struct Advection1D {
    /// Advection velocity (positive = rightward)
    pub velocity: f64,
    /// Interface flux
    pub solver: AdvectionRiemann,
}

impl Advection1D {
    /// Create an advection physics with the exact upwind flux.
    pub fn new(velocity: f64) -> Self {
        Self {
            velocity,
            solver: AdvectionRiemann::Upwind,
        }
    }

    /// Create an advection physics with a named Riemann solver.
    pub fn with_solver(velocity: f64, name: &str) -> FvResult<Self> {
        Ok(Self {
            velocity,
            solver: AdvectionRiemann::from_name(name)?,
        })
    }

    fn profile(&self, profile: usize, s: f64) -> FvResult<f64> {
        // s is the normalized position in [0, 1).
        match profile {
            0 => Ok((2.0 * PI * s).sin()),
            1 => Ok(if (1.0 / 3.0..2.0 / 3.0).contains(&s) {
                1.0
            } else {
                0.0
            }),
            other => Err(FvError::UnknownProfile(other)),
        }
    }
}

impl Physics for Advection1D {
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
        speeds[0] = self.velocity;
        Ok(())
    }

    fn riemann(&self, u_l: &[f64], u_r: &[f64], flux: &mut [f64]) -> FvResult<f64> {
        let a = self.velocity;
        flux[0] = match self.solver {
            AdvectionRiemann::Upwind => a.max(0.0) * u_l[0] + a.min(0.0) * u_r[0],
            AdvectionRiemann::Rusanov => {
                0.5 * (a * u_l[0] + a * u_r[0]) - 0.5 * a.abs() * (u_r[0] - u_l[0])
            }
        };
        Ok(a)
    }

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
        let x0 = match boundary {
            BoundaryType::Periodic => range_mod(x - self.velocity * time, x_min, x_max),
            BoundaryType::Outflow => x - self.velocity * time,
        };
        let s = (x0 - x_min) / (x_max - x_min);
        u[0] = self.profile(profile, s)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_upwind_flux_takes_left_state_for_positive_velocity() {
        let physics = Advection1D::new(2.0);
        let mut flux = [0.0];
        let speed = physics.riemann(&[3.0], &[5.0], &mut flux).unwrap();
        assert!((flux[0] - 6.0).abs() < TOL);
        assert!((speed - 2.0).abs() < TOL);

        let physics = Advection1D::new(-2.0);
        let speed = physics.riemann(&[3.0], &[5.0], &mut flux).unwrap();
        assert!((flux[0] + 10.0).abs() < TOL);
        assert!((speed + 2.0).abs() < TOL);
    }

    #[test]
    fn test_rusanov_matches_upwind_for_smooth_state() {
        let upwind = Advection1D::new(1.5);
        let rusanov = Advection1D::with_solver(1.5, "rusanov").unwrap();
        let mut f_u = [0.0];
        let mut f_r = [0.0];
        upwind.riemann(&[2.0], &[2.0], &mut f_u).unwrap();
        rusanov.riemann(&[2.0], &[2.0], &mut f_r).unwrap();
        assert!((f_u[0] - f_r[0]).abs() < TOL);
    }

    #[test]
    fn test_unknown_riemann_solver() {
        let err = Advection1D::with_solver(1.0, "roe").unwrap_err();
        assert!(matches!(err, FvError::UnknownRiemannSolver(_)));
    }

    #[test]
    fn test_sample_translates_periodically() {
        let physics = Advection1D::new(1.0);
        let mut u0 = [0.0];
        let mut u1 = [0.0];
        // After one full period the wave returns to its initial position.
        physics
            .sample(0, BoundaryType::Periodic, 0.0, 1.0, 0.0, 0.3, &mut u0)
            .unwrap();
        physics
            .sample(0, BoundaryType::Periodic, 0.0, 1.0, 1.0, 0.3, &mut u1)
            .unwrap();
        assert!((u0[0] - u1[0]).abs() < TOL);
    }

    #[test]
    fn test_square_pulse_profile() {
        let physics = Advection1D::new(0.0);
        let mut u = [0.0];
        physics
            .sample(1, BoundaryType::Periodic, 0.0, 1.0, 0.0, 0.5, &mut u)
            .unwrap();
        assert_eq!(u[0], 1.0);
        physics
            .sample(1, BoundaryType::Periodic, 0.0, 1.0, 0.0, 0.1, &mut u)
            .unwrap();
        assert_eq!(u[0], 0.0);
    }

    #[test]
    fn test_unknown_profile() {
        let physics = Advection1D::new(1.0);
        let mut u = [0.0];
        let err = physics
            .sample(7, BoundaryType::Periodic, 0.0, 1.0, 0.0, 0.5, &mut u)
            .unwrap_err();
        assert!(matches!(err, FvError::UnknownProfile(7)));
    }
}
