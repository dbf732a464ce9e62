//! Linear acoustics physics.
//!
//! The 1D linear acoustics system in pressure/velocity form:
//!
//! ∂p/∂t + ρc² ∂u/∂x = 0
//! ∂u/∂t + (1/ρ) ∂p/∂x = 0
//!
//! with density ρ and sound speed c. The flux Jacobian has eigenvalues
//! ±c with right eigenvectors (−Z, 1) and (Z, 1), Z = ρc the acoustic
//! impedance. This is the smallest system with a non-trivial eigenbasis,
//! which makes it the reference check for characteristic-space limiting.

use std::f64::consts::PI;

use super::{range_mod, Physics};
use crate::error::{FvError, FvResult};
use crate::grid::BoundaryType;

/// Riemann solver selection for [`Acoustics1D`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AcousticsRiemann {
    /// Exact characteristic upwinding (the system is linear)
    #[default]
    Characteristic,
    /// Local Lax-Friedrichs
    Rusanov,
}

impl AcousticsRiemann {
    /// Look a solver up by its registry name.
    pub fn from_name(name: &str) -> FvResult<Self> {
        match name {
            "characteristic" => Ok(Self::Characteristic),
            "rusanov" => Ok(Self::Rusanov),
            other => Err(FvError::UnknownRiemannSolver(other.to_string())),
        }
    }
}

/// 1D linear acoustics, state `(p, u)`.
#[derive(Clone, Debug)]
pub struct Acoustics1D {
    /// Background density ρ
    pub rho: f64,
    /// Sound speed c
    pub sound_speed: f64,
    /// Interface flux
    pub solver: AcousticsRiemann,
}

impl Acoustics1D {
    /// Create an acoustics physics with the exact characteristic flux.
    pub fn new(rho: f64, sound_speed: f64) -> Self {
        assert!(rho > 0.0 && sound_speed > 0.0);
        Self {
            rho,
            sound_speed,
            solver: AcousticsRiemann::Characteristic,
        }
    }

    /// Create an acoustics physics with a named Riemann solver.
    pub fn with_solver(rho: f64, sound_speed: f64, name: &str) -> FvResult<Self> {
        Ok(Self {
            solver: AcousticsRiemann::from_name(name)?,
            ..Self::new(rho, sound_speed)
        })
    }

    /// Acoustic impedance Z = ρc.
    pub fn impedance(&self) -> f64 {
        self.rho * self.sound_speed
    }

    /// Physical flux f(q) = (ρc² u, p/ρ).
    fn flux(&self, q: &[f64], out: &mut [f64]) {
        let c = self.sound_speed;
        out[0] = self.rho * c * c * q[1];
        out[1] = q[0] / self.rho;
    }
}

impl Physics for Acoustics1D {
    fn dof(&self) -> usize {
        2
    }

    fn characteristic(
        &self,
        _u: &[f64],
        r: &mut [f64],
        r_inv: &mut [f64],
        speeds: &mut [f64],
    ) -> FvResult<()> {
        let c = self.sound_speed;
        let z = self.impedance();
        // Column 0: left-going wave (λ = -c); column 1: right-going (λ = +c).
        r[0] = -z;
        r[1] = 1.0;
        r[2] = z;
        r[3] = 1.0;
        // Inverse, column-major: r_inv[k + j*2] = entry (k, j).
        r_inv[0] = -0.5 / z;
        r_inv[1] = 0.5 / z;
        r_inv[2] = 0.5;
        r_inv[3] = 0.5;
        speeds[0] = -c;
        speeds[1] = c;
        Ok(())
    }

    fn riemann(&self, u_l: &[f64], u_r: &[f64], flux: &mut [f64]) -> FvResult<f64> {
        let c = self.sound_speed;
        let z = self.impedance();
        match self.solver {
            AcousticsRiemann::Characteristic => {
                // F* = f(qL) + λ₁ α₁ r₁ for the single left-going wave,
                // α₁ = (-Δp + Z Δu) / (2Z).
                let alpha1 = (-(u_r[0] - u_l[0]) + z * (u_r[1] - u_l[1])) / (2.0 * z);
                self.flux(u_l, flux);
                flux[0] -= c * alpha1 * (-z);
                flux[1] -= c * alpha1;
            }
            AcousticsRiemann::Rusanov => {
                let mut f_l = [0.0; 2];
                let mut f_r = [0.0; 2];
                self.flux(u_l, &mut f_l);
                self.flux(u_r, &mut f_r);
                for k in 0..2 {
                    flux[k] = 0.5 * (f_l[k] + f_r[k]) - 0.5 * c * (u_r[k] - u_l[k]);
                }
            }
        }
        Ok(c)
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
        // Right-going simple wave: q(x, t) = g(x - c t) (Z, 1).
        let x0 = match boundary {
            BoundaryType::Periodic => range_mod(x - self.sound_speed * time, x_min, x_max),
            BoundaryType::Outflow => x - self.sound_speed * time,
        };
        let s = (x0 - x_min) / (x_max - x_min);
        let g = match profile {
            0 => (2.0 * PI * s).sin(),
            1 => {
                if (1.0 / 3.0..2.0 / 3.0).contains(&s) {
                    1.0
                } else {
                    0.0
                }
            }
            other => return Err(FvError::UnknownProfile(other)),
        };
        u[0] = self.impedance() * g;
        u[1] = g;
        Ok(())
    }
}
