//! # fv-rs
//!
//! A multirate finite-volume library for 1D hyperbolic conservation laws.
//!
//! This crate provides the core building blocks of a MUSCL-type scheme:
//! - Slope limiters (classical TVD, smooth ratio-based, Čada–Torrilhon)
//! - Characteristic-space reconstruction with per-cell eigen-decomposition
//! - Riemann-solver interface fluxes with CFL-bound tracking
//! - Multirate slow/fast domain partitioning (uniform and two-region
//!   coarse/fine spacing), with compacted per-region right-hand sides
//! - Cell-average sampling of exact solutions and solution statistics
//!
//! The right-hand-side assemblers are pure kernels invoked once per
//! explicit time-integrator stage; time stepping itself lives with the
//! caller.

pub mod cfl;
pub mod error;
pub mod field;
pub mod flux;
pub mod grid;
pub mod limiter;
pub mod partition;
pub mod physics;
pub mod reconstruct;
pub mod rhs;
pub mod sampler;
pub mod stats;

// Re-export main types for convenience
pub use cfl::CflTracker;
pub use error::{FvError, FvResult};
pub use field::{CellField, StateField};
pub use flux::{interface_flux, muscl_states, FluxScratch};
pub use grid::{BoundaryType, Grid1D, HALO_WIDTH};
pub use limiter::{LimitInfo, LimiterKind, ALL_LIMITERS};
pub use partition::{InterfacePosition, Partition};
pub use physics::{Acoustics1D, AcousticsRiemann, Advection1D, AdvectionRiemann, Physics};
pub use reconstruct::{reconstruct_slopes, reconstruct_slopes_split, ReconstructScratch};
pub use rhs::{
    compute_rhs, compute_rhs_fast, compute_rhs_fast_split, compute_rhs_slow,
    compute_rhs_slow_split, compute_rhs_split, RhsResult,
};
pub use sampler::{sample_cell_averages, sample_cell_averages_split};
pub use stats::SolutionStats;

#[cfg(feature = "parallel")]
pub use reconstruct::reconstruct_slopes_parallel;
#[cfg(feature = "parallel")]
pub use rhs::compute_rhs_parallel;
