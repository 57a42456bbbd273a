//! Pivot search for elimination modulo a prime power.
//!
//! A usable pivot must be a unit of the current residue ring, i.e. not
//! divisible by p: entries divisible by p cannot be inverted and only
//! become visible after the modulus is divided down. The selector scans
//! the sparsest candidate rows first and, inside a row, prefers the unit
//! whose column has the fewest live nonzeros.

use locsmith_rings::PowerRing;

use crate::density::ColumnDensity;
use crate::sparse_matrix::{SparseMatrix, SparseRow};

/// Result of scanning one candidate row for a pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotOutcome {
    /// A unit pivot was found and rotated to the row head.
    Found {
        /// The original column label of the pivot, before the head was
        /// relabeled to the frontier column. Differs from the frontier
        /// when a column swap must be recorded.
        pivot_col: usize,
    },
    /// The row is nonempty but every entry is divisible by p. The caller
    /// must divide by p, record a rank breakpoint, and retry.
    NoUnit,
    /// The row has no entries; the rank at this level is complete.
    EmptyRow,
}

/// Candidate rows `from_row..`, sparsest first, ties by row index.
#[must_use]
pub fn ordered_candidates(matrix: &SparseMatrix, from_row: usize) -> Vec<usize> {
    let mut order: Vec<(usize, usize)> = (from_row..matrix.num_rows())
        .map(|row| (matrix.row(row).len(), row))
        .collect();
    order.sort_unstable();
    order.into_iter().map(|(_, row)| row).collect()
}

/// Cheap heuristic: accept the row head as pivot if it already sits in
/// the frontier column and is a unit. Skips the density scan entirely.
#[must_use]
pub fn same_column_pivot(ring: &PowerRing, row: &SparseRow, frontier: usize) -> bool {
    row.first()
        .is_some_and(|&(col, val)| col == frontier && ring.is_unit(val))
}

/// Scans a row for a unit pivot and prepares it for elimination.
///
/// The first unit found fixes the fallback choice; any later unit in a
/// strictly less dense column replaces it. The winner is rotated to the
/// row head (preserving the order of the other entries), the head is
/// relabeled to the frontier column, and the whole row is retired from
/// the density counters at its original column labels.
pub fn search_pivot(
    ring: &PowerRing,
    row: &mut SparseRow,
    frontier: usize,
    density: &mut ColumnDensity,
) -> PivotOutcome {
    if row.is_empty() {
        return PivotOutcome::EmptyRow;
    }
    let mut pivot_col = row[0].0;

    let Some(first_unit) = row.iter().position(|&(_, val)| ring.is_unit(val)) else {
        return PivotOutcome::NoUnit;
    };

    let mut best = first_unit;
    let mut best_density = density.get(row[first_unit].0);
    for (j, &(col, val)) in row.iter().enumerate().skip(first_unit + 1) {
        let d = density.get(col);
        if d < best_density && ring.is_unit(val) {
            best_density = d;
            best = j;
        }
    }

    if best != 0 {
        if pivot_col == frontier {
            // The head already carries the frontier label: swap values
            // only, so the winner's column trades places with the
            // frontier column without breaking sortedness.
            pivot_col = row[best].0;
            let head_val = row[0].1;
            row[0].1 = row[best].1;
            row[best].1 = head_val;
        } else {
            pivot_col = row[best].0;
            row[0..=best].rotate_right(1);
        }
    }

    // Retire before relabeling the head, so every entry is decremented
    // at the column the counters actually track it under.
    density.retire_row(row);
    if pivot_col != frontier {
        row[0].0 = frontier;
    }

    PivotOutcome::Found { pivot_col }
}
