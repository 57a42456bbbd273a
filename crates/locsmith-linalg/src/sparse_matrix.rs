//! Sparse matrices stored as ordered lists of compressed rows.
//!
//! Each row keeps its nonzero entries as `(column, value)` pairs with
//! strictly increasing column indices and no explicit zeros. Row-list
//! storage is what the elimination engine wants: rows shrink and grow
//! independently under fill-in, and a row swap is a pointer swap.

use rayon::prelude::*;
use thiserror::Error;

/// One sparse row: `(column, value)` pairs, strictly increasing columns,
/// no explicit zeros.
pub type SparseRow = Vec<(usize, i64)>;

/// A sparse matrix as an ordered sequence of [`SparseRow`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix {
    rows: Vec<SparseRow>,
    num_cols: usize,
}

impl SparseMatrix {
    /// Creates an empty matrix of the given dimensions.
    #[must_use]
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            rows: vec![SparseRow::new(); num_rows],
            num_cols,
        }
    }

    /// Creates a sparse matrix from a dense matrix.
    ///
    /// Zero entries are not stored.
    ///
    /// # Panics
    ///
    /// Panics if the rows of `dense` have unequal lengths.
    #[must_use]
    pub fn from_dense(dense: &[Vec<i64>]) -> Self {
        let num_cols = dense.first().map_or(0, Vec::len);
        let rows = dense
            .iter()
            .map(|row| {
                assert_eq!(row.len(), num_cols, "ragged dense matrix");
                row.iter()
                    .enumerate()
                    .filter(|&(_, &v)| v != 0)
                    .map(|(col, &v)| (col, v))
                    .collect()
            })
            .collect();
        Self { rows, num_cols }
    }

    /// Converts to a dense row-major representation.
    #[must_use]
    pub fn to_dense(&self) -> Vec<Vec<i64>> {
        self.rows
            .iter()
            .map(|row| {
                let mut dense = vec![0; self.num_cols];
                for &(col, val) in row {
                    dense[col] = val;
                }
                dense
            })
            .collect()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the number of stored nonzero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Checks if the matrix has no rows or no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.num_cols == 0
    }

    /// Appends an entry to a row.
    ///
    /// Entries of one row must be appended in strictly increasing column
    /// order; zero values are dropped.
    ///
    /// # Panics
    ///
    /// Panics on out-of-range indices or a non-increasing column.
    pub fn append(&mut self, row: usize, col: usize, val: i64) {
        assert!(col < self.num_cols, "column {col} out of range");
        let row = &mut self.rows[row];
        if let Some(&(last_col, _)) = row.last() {
            assert!(last_col < col, "append out of order: {last_col} then {col}");
        }
        if val != 0 {
            row.push((col, val));
        }
    }

    /// Sets a single entry, keeping the row sorted.
    ///
    /// A zero value removes the entry. Slower per call than the bulk
    /// [`TripletBuilder`]: O(row length) against O(log n) amortized.
    ///
    /// # Panics
    ///
    /// Panics on out-of-range indices.
    pub fn set_entry(&mut self, row: usize, col: usize, val: i64) {
        assert!(col < self.num_cols, "column {col} out of range");
        let row = &mut self.rows[row];
        match row.binary_search_by_key(&col, |&(c, _)| c) {
            Ok(pos) => {
                if val == 0 {
                    row.remove(pos);
                } else {
                    row[pos].1 = val;
                }
            }
            Err(pos) => {
                if val != 0 {
                    row.insert(pos, (col, val));
                }
            }
        }
    }

    /// Returns the entry at (row, col), or `None` if zero.
    ///
    /// # Panics
    ///
    /// Panics on out-of-range indices.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        assert!(col < self.num_cols, "column {col} out of range");
        let row = &self.rows[row];
        row.binary_search_by_key(&col, |&(c, _)| c)
            .ok()
            .map(|pos| row[pos].1)
    }

    /// Borrows a row.
    #[must_use]
    pub fn row(&self, row: usize) -> &SparseRow {
        &self.rows[row]
    }

    /// Mutably borrows a row.
    pub fn row_mut(&mut self, row: usize) -> &mut SparseRow {
        &mut self.rows[row]
    }

    /// Mutably borrows all rows at once.
    ///
    /// The elimination loop needs a shared pivot row alongside mutable
    /// target rows, which it obtains by splitting this slice.
    pub(crate) fn rows_mut(&mut self) -> &mut [SparseRow] {
        &mut self.rows
    }

    /// Swaps two rows in O(1).
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
    }

    /// Resizes the matrix.
    ///
    /// New rows are empty. Shrinking the row count drops rows.
    ///
    /// # Panics
    ///
    /// Panics if shrinking the column count would drop a stored entry.
    pub fn resize(&mut self, num_rows: usize, num_cols: usize) {
        if num_cols < self.num_cols {
            let widest = self
                .rows
                .iter()
                .filter_map(|row| row.last().map(|&(c, _)| c))
                .max();
            assert!(
                widest.map_or(true, |c| c < num_cols),
                "resize would drop entries beyond column {num_cols}"
            );
        }
        self.rows.resize(num_rows, SparseRow::new());
        self.num_cols = num_cols;
    }

    /// Returns the transpose.
    ///
    /// Two-pass counting sort: count the nonzeros per target row, then
    /// scatter into rows grown to exactly that capacity. O(nnz), and
    /// `a.transpose().transpose() == a` exactly.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut counts = vec![0usize; self.num_cols];
        for row in &self.rows {
            for &(col, _) in row {
                counts[col] += 1;
            }
        }

        let mut rows: Vec<SparseRow> = counts
            .iter()
            .map(|&count| SparseRow::with_capacity(count))
            .collect();
        for (i, row) in self.rows.iter().enumerate() {
            for &(col, val) in row {
                rows[col].push((i, val));
            }
        }

        Self {
            rows,
            num_cols: self.num_rows(),
        }
    }

    /// Checks the row invariants: strictly increasing columns in range,
    /// no explicit zeros. Used by tests and debug assertions.
    #[must_use]
    pub fn rows_are_canonical(&self) -> bool {
        self.rows.iter().all(|row| {
            row.iter().all(|&(col, val)| col < self.num_cols && val != 0)
                && row.windows(2).all(|w| w[0].0 < w[1].0)
        })
    }
}

/// Errors from [`TripletBuilder::finalize`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A triple addressed a position outside the matrix.
    #[error("entry ({row}, {col}) outside a {num_rows}x{num_cols} matrix")]
    EntryOutOfBounds {
        /// Row index of the offending triple.
        row: usize,
        /// Column index of the offending triple.
        col: usize,
        /// Declared row count.
        num_rows: usize,
        /// Declared column count.
        num_cols: usize,
    },
}

/// Bulk matrix builder accepting `(row, col, value)` triples in any order.
///
/// `finalize` sorts once (O(n log n)), sums duplicates and drops zeros.
/// This is the fast path for loading a matrix from an external triple
/// stream; use [`SparseMatrix::set_entry`] for incremental edits.
#[derive(Debug, Clone)]
pub struct TripletBuilder {
    num_rows: usize,
    num_cols: usize,
    triples: Vec<(usize, usize, i64)>,
}

impl TripletBuilder {
    /// Creates a builder for a matrix of the given dimensions.
    #[must_use]
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            triples: Vec::new(),
        }
    }

    /// Records one triple. Order does not matter; duplicates are summed
    /// at finalize time.
    pub fn push(&mut self, row: usize, col: usize, val: i64) {
        self.triples.push((row, col, val));
    }

    /// Builds the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EntryOutOfBounds`] for a triple outside the
    /// declared dimensions; triples come from an external stream, so a
    /// bad position is data, not a caller bug.
    pub fn finalize(mut self) -> Result<SparseMatrix, BuildError> {
        for &(row, col, _) in &self.triples {
            if row >= self.num_rows || col >= self.num_cols {
                return Err(BuildError::EntryOutOfBounds {
                    row,
                    col,
                    num_rows: self.num_rows,
                    num_cols: self.num_cols,
                });
            }
        }

        self.triples.par_sort_unstable_by_key(|&(r, c, _)| (r, c));

        let mut matrix = SparseMatrix::new(self.num_rows, self.num_cols);
        let mut iter = self.triples.into_iter().peekable();
        while let Some((row, col, mut val)) = iter.next() {
            while let Some(&(r, c, v)) = iter.peek() {
                if r == row && c == col {
                    val += v;
                    iter.next();
                } else {
                    break;
                }
            }
            if val != 0 {
                matrix.rows[row].push((col, val));
            }
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dense() {
        let dense = vec![vec![1, 0, 2], vec![0, 3, 0], vec![4, 0, 5]];
        let sparse = SparseMatrix::from_dense(&dense);

        assert_eq!(sparse.num_rows(), 3);
        assert_eq!(sparse.num_cols(), 3);
        assert_eq!(sparse.nnz(), 5);

        assert_eq!(sparse.get(0, 0), Some(1));
        assert_eq!(sparse.get(0, 1), None);
        assert_eq!(sparse.get(0, 2), Some(2));
        assert_eq!(sparse.get(1, 1), Some(3));
        assert_eq!(sparse.get(2, 0), Some(4));
        assert_eq!(sparse.get(2, 2), Some(5));
        assert!(sparse.rows_are_canonical());
    }

    #[test]
    fn test_dense_round_trip() {
        let dense = vec![vec![1, 0, -2], vec![0, 0, 0], vec![4, -1, 5]];
        assert_eq!(SparseMatrix::from_dense(&dense).to_dense(), dense);
    }

    #[test]
    fn test_append_and_swap() {
        let mut m = SparseMatrix::new(2, 4);
        m.append(0, 1, 7);
        m.append(0, 3, -2);
        m.append(1, 0, 5);
        m.append(1, 2, 0); // dropped

        assert_eq!(m.nnz(), 3);
        m.swap_rows(0, 1);
        assert_eq!(m.get(0, 0), Some(5));
        assert_eq!(m.get(1, 3), Some(-2));
    }

    #[test]
    #[should_panic(expected = "append out of order")]
    fn test_append_out_of_order() {
        let mut m = SparseMatrix::new(1, 4);
        m.append(0, 2, 1);
        m.append(0, 1, 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range() {
        let m = SparseMatrix::new(2, 2);
        let _ = m.get(0, 5);
    }

    #[test]
    fn test_set_entry() {
        let mut m = SparseMatrix::new(1, 5);
        m.set_entry(0, 3, 9);
        m.set_entry(0, 1, 4);
        m.set_entry(0, 2, 6);
        assert_eq!(m.row(0), &vec![(1, 4), (2, 6), (3, 9)]);

        m.set_entry(0, 2, -1); // overwrite
        m.set_entry(0, 1, 0); // remove
        assert_eq!(m.row(0), &vec![(2, -1), (3, 9)]);
        assert!(m.rows_are_canonical());
    }

    #[test]
    fn test_transpose() {
        let m = SparseMatrix::from_dense(&[vec![1, 2, 0], vec![0, 3, 4]]);
        let t = m.transpose();

        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.num_cols(), 2);
        assert_eq!(t.get(0, 0), Some(1));
        assert_eq!(t.get(1, 0), Some(2));
        assert_eq!(t.get(1, 1), Some(3));
        assert_eq!(t.get(2, 1), Some(4));
    }

    #[test]
    fn test_transpose_involution() {
        let m = SparseMatrix::from_dense(&[
            vec![1, 0, 0, -7],
            vec![0, 0, 0, 0],
            vec![2, 3, 0, 1],
        ]);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_resize() {
        let mut m = SparseMatrix::from_dense(&[vec![1, 0], vec![0, 2]]);
        m.resize(3, 4);
        assert_eq!(m.num_rows(), 3);
        assert_eq!(m.num_cols(), 4);
        assert_eq!(m.nnz(), 2);

        m.resize(1, 2);
        assert_eq!(m.num_rows(), 1);
        assert_eq!(m.get(0, 0), Some(1));
    }

    #[test]
    #[should_panic(expected = "resize would drop entries")]
    fn test_resize_dropping_entries() {
        let mut m = SparseMatrix::from_dense(&[vec![0, 0, 1]]);
        m.resize(1, 2);
    }

    #[test]
    fn test_triplet_builder() {
        let mut b = TripletBuilder::new(3, 3);
        b.push(2, 1, 4);
        b.push(0, 0, 1);
        b.push(2, 1, -4); // cancels
        b.push(1, 2, 3);
        b.push(1, 2, 1); // sums to 4
        let m = b.finalize().unwrap();

        assert_eq!(m.nnz(), 2);
        assert_eq!(m.get(0, 0), Some(1));
        assert_eq!(m.get(1, 2), Some(4));
        assert_eq!(m.get(2, 1), None);
        assert!(m.rows_are_canonical());
    }

    #[test]
    fn test_triplet_builder_out_of_bounds() {
        let mut b = TripletBuilder::new(2, 2);
        b.push(0, 0, 1);
        b.push(5, 1, 2);
        assert_eq!(
            b.finalize(),
            Err(BuildError::EntryOutOfBounds {
                row: 5,
                col: 1,
                num_rows: 2,
                num_cols: 2
            })
        );
    }
}
