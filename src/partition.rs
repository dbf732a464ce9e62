//! Multirate slow/fast domain partitioning.
//!
//! A [`Partition`] splits the cell range into a slow (coarse) and a fast
//! (fine) region. Two layouts are used by the assemblers:
//!
//! - *Uniform spacing* ([`crate::rhs::compute_rhs_slow`] /
//!   [`crate::rhs::compute_rhs_fast`]): the slow region is the index prefix
//!   `0..n_slow`, the fast region is `n_slow..n_cells`, all cells share one
//!   width.
//! - *Two-region spacing* (the `*_split` assemblers): the domain is three
//!   physical zones, coarse / fine / coarse, with the slow cells split
//!   evenly around the fine zone. Interfaces are classified by
//!   [`InterfacePosition`], which both the partition-aware limiter and the
//!   flux engine consume, so the spacing-selection logic lives in exactly
//!   one place.

use crate::grid::Grid1D;

/// Slow/fast split description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    /// Number of slow (coarse) cells
    pub n_slow: usize,
    /// Number of fast (fine) cells
    pub n_fast: usize,
    /// Spacing ratio `hxs / hxf` between coarse and fine cells
    pub hratio: usize,
}

impl Partition {
    /// Create a partition with explicit counts.
    pub fn new(n_slow: usize, n_fast: usize, hratio: usize) -> Self {
        assert!(hratio >= 1, "spacing ratio must be at least 1");
        Self {
            n_slow,
            n_fast,
            hratio,
        }
    }

    /// Derive the counts from a grid: the coarse zones cover half the
    /// domain, so `n_slow = Mx / (1 + hratio)` (integer division, matching
    /// the original layout) and the fast cells take the remainder.
    pub fn for_grid(grid: &Grid1D, hratio: usize) -> Self {
        assert!(hratio >= 1, "spacing ratio must be at least 1");
        let n_slow = grid.n_cells / (1 + hratio);
        Self {
            n_slow,
            n_fast: grid.n_cells - n_slow,
            hratio,
        }
    }

    /// Coarse cell width in the two-region layout.
    pub fn hxs(&self, grid: &Grid1D) -> f64 {
        grid.length() / 2.0 * (self.hratio as f64 + 1.0) / grid.n_cells as f64
    }

    /// Fine cell width in the two-region layout.
    pub fn hxf(&self, grid: &Grid1D) -> f64 {
        grid.length() / 2.0 * (1.0 + 1.0 / self.hratio as f64) / grid.n_cells as f64
    }

    /// Interface index where the leading coarse zone meets the fine zone.
    pub fn seam_in(&self) -> usize {
        self.n_slow / 2
    }

    /// Interface index where the fine zone meets the trailing coarse zone.
    pub fn seam_out(&self) -> usize {
        self.n_slow / 2 + self.n_fast
    }
}

/// Position of an interface relative to the two-region partition.
///
/// Interface `i` separates cells `i - 1` and `i`. The two seam interfaces
/// blend the coarse and fine half-widths; everything else is strictly
/// inside one region. Ghost interfaces beyond the domain classify as
/// interior-slow, matching the fallback branch of the original cascades.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfacePosition {
    /// Both sides are coarse cells
    InteriorSlow,
    /// Last coarse cell on the left, first fine cell on the right
    SlowFastBoundary,
    /// Both sides are fine cells
    InteriorFast,
    /// Last fine cell on the left, first coarse cell on the right
    FastSlowBoundary,
}

impl InterfacePosition {
    /// Classify interface `i` against the partition seams.
    pub fn classify(i: isize, partition: &Partition) -> Self {
        let seam_in = partition.seam_in() as isize;
        let seam_out = partition.seam_out() as isize;
        if i == seam_in {
            Self::SlowFastBoundary
        } else if i == seam_out {
            Self::FastSlowBoundary
        } else if i > seam_in && i < seam_out {
            Self::InteriorFast
        } else {
            Self::InteriorSlow
        }
    }

    /// Effective spacing at this interface: the region width inside a
    /// region, the arithmetic mean of the two half-widths at a seam.
    pub fn spacing(self, hxs: f64, hxf: f64) -> f64 {
        match self {
            Self::InteriorSlow => hxs,
            Self::InteriorFast => hxf,
            Self::SlowFastBoundary | Self::FastSlowBoundary => 0.5 * (hxs + hxf),
        }
    }

    /// Cell width on the left side of the interface.
    pub fn left_width(self, hxs: f64, hxf: f64) -> f64 {
        match self {
            Self::InteriorSlow | Self::SlowFastBoundary => hxs,
            Self::InteriorFast | Self::FastSlowBoundary => hxf,
        }
    }

    /// Cell width on the right side of the interface.
    pub fn right_width(self, hxs: f64, hxf: f64) -> f64 {
        match self {
            Self::InteriorSlow | Self::FastSlowBoundary => hxs,
            Self::InteriorFast | Self::SlowFastBoundary => hxf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BoundaryType;

    #[test]
    fn test_for_grid_counts() {
        let grid = Grid1D::serial(0.0, 1.0, 40, BoundaryType::Periodic);
        let p = Partition::for_grid(&grid, 3);
        assert_eq!(p.n_slow, 10);
        assert_eq!(p.n_fast, 30);
    }

    #[test]
    fn test_zone_extents_cover_domain() {
        let grid = Grid1D::serial(-2.0, 2.0, 40, BoundaryType::Periodic);
        let p = Partition::for_grid(&grid, 3);
        let coarse = p.hxs(&grid) * p.n_slow as f64;
        let fine = p.hxf(&grid) * p.n_fast as f64;
        assert!(
            (coarse - 2.0).abs() < 1e-12,
            "coarse zones should cover half the domain, got {coarse}"
        );
        assert!(
            (fine - 2.0).abs() < 1e-12,
            "fine zone should cover half the domain, got {fine}"
        );
    }

    #[test]
    fn test_classification() {
        // n_slow = 4, n_fast = 6: seams at interfaces 2 and 8.
        let p = Partition::new(4, 6, 4);
        use InterfacePosition::*;
        assert_eq!(InterfacePosition::classify(-1, &p), InteriorSlow);
        assert_eq!(InterfacePosition::classify(0, &p), InteriorSlow);
        assert_eq!(InterfacePosition::classify(1, &p), InteriorSlow);
        assert_eq!(InterfacePosition::classify(2, &p), SlowFastBoundary);
        assert_eq!(InterfacePosition::classify(3, &p), InteriorFast);
        assert_eq!(InterfacePosition::classify(7, &p), InteriorFast);
        assert_eq!(InterfacePosition::classify(8, &p), FastSlowBoundary);
        assert_eq!(InterfacePosition::classify(9, &p), InteriorSlow);
        assert_eq!(InterfacePosition::classify(11, &p), InteriorSlow);
    }

    #[test]
    fn test_seam_widths() {
        let pos = InterfacePosition::SlowFastBoundary;
        assert_eq!(pos.left_width(0.4, 0.1), 0.4);
        assert_eq!(pos.right_width(0.4, 0.1), 0.1);
        assert!((pos.spacing(0.4, 0.1) - 0.25).abs() < 1e-15);

        let pos = InterfacePosition::FastSlowBoundary;
        assert_eq!(pos.left_width(0.4, 0.1), 0.1);
        assert_eq!(pos.right_width(0.4, 0.1), 0.4);
    }
}
