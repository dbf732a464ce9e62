//! 1D cell-centered grid description.
//!
//! A grid is a partition of `[x_min, x_max]` into `n_cells` cells indexed
//! `0..n_cells`. Each worker owns a contiguous sub-range `[xs, xs + xm)`
//! and carries a fixed-width ghost layer of [`HALO_WIDTH`] cells on each
//! side of it. Ghost cells are populated by an external halo exchange
//! before any solver call, except for outflow boundaries which the core
//! extends itself (see [`crate::field::StateField::apply_outflow`]).

/// Ghost-layer width on each side of the owned range.
///
/// Two cells: one for the jump stencil of the reconstruction, one more so
/// the neighbor's slope is available at the owned-range boundary.
pub const HALO_WIDTH: usize = 2;

/// Boundary-condition kind at the domain ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryType {
    /// Zero-gradient extension: ghost cells copy the nearest interior cell.
    /// Applied by the solver core itself before reconstruction.
    Outflow,
    /// Periodic wrap. Handled at the distribution level by the external
    /// halo exchange; the core never writes these ghosts.
    Periodic,
}

/// Cell-centered grid over `[x_min, x_max]` with an owned sub-range.
#[derive(Clone, Debug)]
pub struct Grid1D {
    /// Total number of cells in the (global) domain
    pub n_cells: usize,
    /// Left endpoint of domain
    pub x_min: f64,
    /// Right endpoint of domain
    pub x_max: f64,
    /// Boundary-condition kind
    pub boundary: BoundaryType,
    /// First owned cell index
    pub xs: usize,
    /// Number of owned cells
    pub xm: usize,
}

impl Grid1D {
    /// Create a grid owned entirely by the calling worker.
    pub fn serial(x_min: f64, x_max: f64, n_cells: usize, boundary: BoundaryType) -> Self {
        assert!(n_cells > 0, "need at least one cell");
        assert!(x_max > x_min, "x_max must be greater than x_min");
        Self {
            n_cells,
            x_min,
            x_max,
            boundary,
            xs: 0,
            xm: n_cells,
        }
    }

    /// Create a grid with an explicit owned range `[xs, xs + xm)`.
    pub fn with_owned_range(
        x_min: f64,
        x_max: f64,
        n_cells: usize,
        boundary: BoundaryType,
        xs: usize,
        xm: usize,
    ) -> Self {
        assert!(n_cells > 0, "need at least one cell");
        assert!(x_max > x_min, "x_max must be greater than x_min");
        assert!(xs + xm <= n_cells, "owned range exceeds the domain");
        Self {
            n_cells,
            x_min,
            x_max,
            boundary,
            xs,
            xm,
        }
    }

    /// Physical length of the domain.
    pub fn length(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Uniform cell width `(x_max - x_min) / n_cells`.
    pub fn hx(&self) -> f64 {
        self.length() / self.n_cells as f64
    }

    /// Whether a global cell index lies in the owned range.
    pub fn owns(&self, i: isize) -> bool {
        i >= self.xs as isize && i < (self.xs + self.xm) as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_grid() {
        let grid = Grid1D::serial(-1.0, 1.0, 50, BoundaryType::Periodic);
        assert_eq!(grid.xs, 0);
        assert_eq!(grid.xm, 50);
        assert!((grid.hx() - 0.04).abs() < 1e-15);
        assert!((grid.length() - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_owned_range() {
        let grid = Grid1D::with_owned_range(0.0, 1.0, 40, BoundaryType::Outflow, 10, 20);
        assert!(!grid.owns(9));
        assert!(grid.owns(10));
        assert!(grid.owns(29));
        assert!(!grid.owns(30));
        assert!(!grid.owns(-1));
    }
}
