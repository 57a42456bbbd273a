//! Per-column live-nonzero counters.
//!
//! The pivot selector prefers columns with few live nonzeros to limit
//! fill-in. The counters track the not-yet-processed submatrix only:
//! retiring a pivot row, cancelling an entry, and creating fill-in all
//! update them, so they equal the true counts throughout a run. This is
//! a greedy tie-break heuristic, not a global fill-in optimum.

use crate::sparse_matrix::SparseMatrix;

/// Live-nonzero count per column of the unprocessed submatrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDensity(Vec<usize>);

impl ColumnDensity {
    /// All-zero counters for `num_cols` columns.
    #[must_use]
    pub fn zeros(num_cols: usize) -> Self {
        Self(vec![0; num_cols])
    }

    /// Counters matching the rows `from_row..` of a matrix.
    #[must_use]
    pub fn count_rows(matrix: &SparseMatrix, from_row: usize) -> Self {
        let mut density = Self::zeros(matrix.num_cols());
        for row in from_row..matrix.num_rows() {
            for &(col, _) in matrix.row(row) {
                density.increment(col);
            }
        }
        density
    }

    /// Returns the live count of a column.
    #[must_use]
    pub fn get(&self, col: usize) -> usize {
        self.0[col]
    }

    /// Records a new nonzero (fill-in) in a column.
    pub fn increment(&mut self, col: usize) {
        self.0[col] += 1;
    }

    /// Records a vanished nonzero (cancellation or pivot retirement).
    ///
    /// # Panics
    ///
    /// Panics if the column count is already zero; that means the
    /// tracker fell out of sync with the matrix.
    pub fn decrement(&mut self, col: usize) {
        assert!(self.0[col] > 0, "density underflow in column {col}");
        self.0[col] -= 1;
    }

    /// Retires a whole row from the live submatrix.
    pub fn retire_row(&mut self, row: &[(usize, i64)]) {
        for &(col, _) in row {
            self.decrement(col);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_rows() {
        let m = SparseMatrix::from_dense(&[vec![1, 0, 2], vec![3, 4, 0], vec![0, 5, 6]]);
        let d = ColumnDensity::count_rows(&m, 0);
        assert_eq!(d.get(0), 2);
        assert_eq!(d.get(1), 2);
        assert_eq!(d.get(2), 2);

        let d = ColumnDensity::count_rows(&m, 1);
        assert_eq!(d.get(0), 1);
        assert_eq!(d.get(2), 1);
    }

    #[test]
    fn test_updates() {
        let mut d = ColumnDensity::zeros(3);
        d.increment(1);
        d.increment(1);
        d.decrement(1);
        assert_eq!(d.get(1), 1);
        assert_eq!(d.get(0), 0);

        d.increment(0);
        d.retire_row(&[(0, 7), (1, -2)]);
        assert_eq!(d.get(0), 0);
        assert_eq!(d.get(1), 0);
    }

    #[test]
    #[should_panic(expected = "density underflow")]
    fn test_underflow() {
        let mut d = ColumnDensity::zeros(2);
        d.decrement(0);
    }
}
