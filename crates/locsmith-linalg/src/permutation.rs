//! Column permutation bookkeeping.
//!
//! Pivot search relabels the chosen pivot column to the elimination
//! frontier; [`Permutation`] accumulates those transpositions so the
//! result consumer can map working column positions back to the
//! original labels.

use crate::sparse_matrix::SparseRow;

/// A bijection on column indices, built from recorded transpositions.
///
/// `image(k)` is the original label of working column `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    images: Vec<usize>,
}

impl Permutation {
    /// The identity permutation on `n` columns.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self {
            images: (0..n).collect(),
        }
    }

    /// Number of columns the permutation acts on.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true for the permutation on zero columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Returns true if no swap moved anything.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.images.iter().enumerate().all(|(i, &im)| i == im)
    }

    /// Records a transposition of columns `i` and `j`.
    pub fn transpose(&mut self, i: usize, j: usize) {
        self.images.swap(i, j);
    }

    /// The original column label of working column `i`.
    #[must_use]
    pub fn image(&self, i: usize) -> usize {
        self.images[i]
    }

    /// Maps a row from working coordinates back to original column
    /// labels, re-sorting by column.
    #[must_use]
    pub fn apply_to_row(&self, row: &SparseRow) -> SparseRow {
        let mut mapped: SparseRow = row.iter().map(|&(col, val)| (self.images[col], val)).collect();
        mapped.sort_unstable_by_key(|&(col, _)| col);
        mapped
    }
}
