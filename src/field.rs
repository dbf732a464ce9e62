//! Cell-averaged field storage.
//!
//! Two storage types back the solver:
//!
//! - [`StateField`] holds `dof` scalars for every cell in the halo-extended
//!   owned range `[xs - HALO_WIDTH, xs + xm + HALO_WIDTH)` and is indexed by
//!   *global* signed cell index. This replaces the original ghost-offset
//!   pointer arithmetic with bounds-checked accessors while keeping the
//!   exact ghost-layer semantics.
//! - [`CellField`] is a plain `0..len` output vector, used for the full-mode
//!   right-hand side (length `xm`), the compacted slow/fast right-hand
//!   sides, and sampled cell averages.

use crate::grid::{BoundaryType, Grid1D, HALO_WIDTH};

/// Halo-padded state storage indexed by global cell index.
#[derive(Clone, Debug, PartialEq)]
pub struct StateField {
    data: Vec<f64>,
    dof: usize,
    /// Global index of the first stored (ghost) cell: `xs - HALO_WIDTH`.
    first: isize,
    /// Number of stored cells: `xm + 2 * HALO_WIDTH`.
    n_stored: usize,
}

impl StateField {
    /// Create a zeroed field over the halo-extended owned range of `grid`.
    pub fn new(grid: &Grid1D, dof: usize) -> Self {
        assert!(dof > 0, "need at least one component per cell");
        let n_stored = grid.xm + 2 * HALO_WIDTH;
        Self {
            data: vec![0.0; n_stored * dof],
            dof,
            first: grid.xs as isize - HALO_WIDTH as isize,
            n_stored,
        }
    }

    /// Number of components per cell.
    pub fn dof(&self) -> usize {
        self.dof
    }

    fn offset(&self, i: isize) -> usize {
        let local = i - self.first;
        assert!(
            local >= 0 && (local as usize) < self.n_stored,
            "cell index {} outside stored range [{}, {})",
            i,
            self.first,
            self.first + self.n_stored as isize
        );
        local as usize * self.dof
    }

    /// Component values of cell `i` (global index, ghosts included).
    pub fn cell(&self, i: isize) -> &[f64] {
        let o = self.offset(i);
        &self.data[o..o + self.dof]
    }

    /// Mutable component values of cell `i`.
    pub fn cell_mut(&mut self, i: isize) -> &mut [f64] {
        let o = self.offset(i);
        &mut self.data[o..o + self.dof]
    }

    /// Copy owned-range cell values from a [`CellField`] of length `xm`.
    pub fn load_interior(&mut self, grid: &Grid1D, values: &CellField) {
        assert_eq!(values.dof(), self.dof, "component count mismatch");
        assert_eq!(values.len(), grid.xm, "owned-range length mismatch");
        for i in 0..grid.xm {
            self.cell_mut((grid.xs + i) as isize)
                .copy_from_slice(values.cell(i));
        }
    }

    /// Extend the state into ghost cells at outflow boundaries by copying
    /// the nearest interior cell. No-op for other boundary kinds and for
    /// workers not adjacent to a domain end.
    pub fn apply_outflow(&mut self, grid: &Grid1D) {
        if grid.boundary != BoundaryType::Outflow {
            return;
        }
        let xs = grid.xs as isize;
        let xm = grid.xm as isize;
        let mx = grid.n_cells as isize;
        let mut i = xs - HALO_WIDTH as isize;
        while i < 0 {
            let inner: Vec<f64> = self.cell(0).to_vec();
            self.cell_mut(i).copy_from_slice(&inner);
            i += 1;
        }
        let mut i = mx;
        while i < xs + xm + HALO_WIDTH as isize {
            let inner: Vec<f64> = self.cell(xs + xm - 1).to_vec();
            self.cell_mut(i).copy_from_slice(&inner);
            i += 1;
        }
    }

    /// Global index of the first stored (ghost) cell.
    #[cfg(feature = "parallel")]
    pub(crate) fn first_index(&self) -> isize {
        self.first
    }

    /// Flat mutable view of all stored cells, cell-major.
    #[cfg(feature = "parallel")]
    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Fill ghost cells by periodic wrap.
    ///
    /// Serial stand-in for the distributed halo exchange; only valid when
    /// the calling worker owns the whole domain.
    pub fn apply_periodic(&mut self, grid: &Grid1D) {
        assert!(
            grid.xs == 0 && grid.xm == grid.n_cells,
            "periodic ghost fill requires a serially owned grid"
        );
        let mx = grid.n_cells as isize;
        for g in 1..=HALO_WIDTH as isize {
            let left: Vec<f64> = self.cell(mx - g).to_vec();
            self.cell_mut(-g).copy_from_slice(&left);
            let right: Vec<f64> = self.cell(g - 1).to_vec();
            self.cell_mut(mx + g - 1).copy_from_slice(&right);
        }
    }
}

/// Plain cell-indexed output storage (no ghost layer).
#[derive(Clone, Debug, PartialEq)]
pub struct CellField {
    data: Vec<f64>,
    dof: usize,
    len: usize,
}

impl CellField {
    /// Create a zeroed field of `len` cells with `dof` components each.
    pub fn new(len: usize, dof: usize) -> Self {
        assert!(dof > 0, "need at least one component per cell");
        Self {
            data: vec![0.0; len * dof],
            dof,
            len,
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the field holds no cells.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of components per cell.
    pub fn dof(&self) -> usize {
        self.dof
    }

    /// Component values of cell `k`.
    pub fn cell(&self, k: usize) -> &[f64] {
        let o = k * self.dof;
        &self.data[o..o + self.dof]
    }

    /// Mutable component values of cell `k`.
    pub fn cell_mut(&mut self, k: usize) -> &mut [f64] {
        let o = k * self.dof;
        &mut self.data[o..o + self.dof]
    }

    /// Flat view of all values, cell-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
