//! Rank modulo a prime power by sparse Gaussian elimination.
//!
//! The lifter drives pivot search and row elimination over the residue
//! ring Z/p^e Z, dividing the working modulus by p whenever no unit
//! pivot remains and recording the rank reached before each division.
//! The resulting rank sequence at p, p^2, ..., p^e determines the local
//! Smith normal form at p.
//!
//! The run is strictly sequential: every elimination step depends on the
//! exact state left by the previous pivot choice. The matrix is mutated
//! in place and is not usable after an interrupted run; callers that
//! need to keep the input must clone it first.

use locsmith_rings::PowerRing;

use crate::density::ColumnDensity;
use crate::elimination::{eliminate_row, Scratch};
use crate::permutation::Permutation;
use crate::pivot::{ordered_candidates, same_column_pivot, search_pivot, PivotOutcome};
use crate::sparse_matrix::{SparseMatrix, SparseRow};

/// Strategy flags for the elimination loop.
///
/// Both default to off; the defaults give the brute-force reference
/// behavior. The four combinations share one control loop and produce
/// the same final rank, but may pick different pivots and therefore
/// different permutations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GaussOptions {
    /// Before the full pivot scan, try each candidate row's head entry
    /// and accept it when it already sits in the frontier column and is
    /// a unit. A cheap heuristic that avoids column swaps.
    pub prefer_same_column: bool,
    /// Keep each pivot row after its elimination step instead of
    /// clearing it to save memory. Needed to reconstruct the reduced
    /// upper matrix afterwards.
    pub preserve_upper: bool,
}

/// Callback surface for long elimination runs.
///
/// Injected into the lifter so progress reporting is the caller's
/// concern, not a global.
pub trait ProgressObserver {
    /// Called periodically with the current frontier row.
    fn on_progress(&mut self, _row: usize, _total: usize) {}

    /// Called when the working modulus is divided by p: `rank` is the
    /// rank achieved modulo p^`power`.
    fn on_rank_breakpoint(&mut self, _power: u32, _rank: usize) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl ProgressObserver for SilentObserver {}

/// Ranks achieved modulo p, p^2, ..., p^e, in order. Non-decreasing and
/// bounded by `min(rows, cols)`; always exactly `e` entries.
pub type RankSequence = Vec<usize>;

/// Output of one elimination run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerGaussResult {
    /// Rank at each power of p.
    pub ranks: RankSequence,
    /// Column transpositions performed to bring pivots to the diagonal.
    pub permutation: Permutation,
}

impl PowerGaussResult {
    /// The rank modulo p^e, i.e. the last entry of the sequence.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.ranks.last().copied().unwrap_or(0)
    }
}

/// Sparse elimination engine for rank modulo a prime power.
#[derive(Debug, Clone)]
pub struct PowerGauss {
    ring: PowerRing,
    options: GaussOptions,
}

impl PowerGauss {
    /// Creates an engine over the given residue ring.
    #[must_use]
    pub fn new(ring: PowerRing, options: GaussOptions) -> Self {
        Self { ring, options }
    }

    /// Runs the elimination, consuming the matrix content.
    ///
    /// The matrix is reduced in place; with
    /// [`GaussOptions::preserve_upper`] set, the surviving rows hold the
    /// reduced upper matrix in working column coordinates.
    pub fn rank_sequence(&self, matrix: &mut SparseMatrix) -> PowerGaussResult {
        self.rank_sequence_with(matrix, &mut SilentObserver)
    }

    /// Runs the elimination, reporting progress to `observer`.
    ///
    /// # Panics
    ///
    /// Panics only on broken internal invariants (contract violations);
    /// a singular matrix is a valid outcome, reported through the rank
    /// sequence.
    pub fn rank_sequence_with(
        &self,
        matrix: &mut SparseMatrix,
        observer: &mut dyn ProgressObserver,
    ) -> PowerGaussResult {
        let num_rows = matrix.num_rows();
        let num_cols = matrix.num_cols();
        let mut q = Permutation::identity(num_cols);
        let mut ranks = RankSequence::with_capacity(self.ring.exponent() as usize);
        let mut ring = self.ring;
        let prime = ring.prime();

        // Bring every entry to its canonical residue, dropping the ones
        // the modulus kills, and count the initial column densities.
        let mut density = ColumnDensity::zeros(num_cols);
        for r in 0..num_rows {
            let row = matrix.row_mut(r);
            for entry in row.iter_mut() {
                entry.1 = ring.reduce(entry.1);
            }
            row.retain(|&(_, val)| val != 0);
            for &(col, _) in row.iter() {
                density.increment(col);
            }
        }

        if num_rows == 0 || num_cols == 0 {
            while !ring.is_trivial() {
                ring = ring.descend();
                ranks.push(0);
            }
            return PowerGaussResult {
                ranks,
                permutation: q,
            };
        }

        let mut pivot_count = 0usize;
        let mut scratch = Scratch::new();
        let last = num_rows - 1;
        let stride = (num_rows / 100).clamp(10, 1000);

        for k in 0..last {
            if k % stride == 0 {
                observer.on_progress(k, num_rows);
            }

            // Searching: scan candidates sparsest-first until a row
            // yields a pivot or runs empty; descend the modulus when no
            // candidate holds a unit.
            let (chosen_row, outcome) = loop {
                let candidates = ordered_candidates(matrix, k);

                if self.options.prefer_same_column {
                    let hit = candidates
                        .iter()
                        .copied()
                        .find(|&r| same_column_pivot(&ring, matrix.row(r), pivot_count));
                    if let Some(r) = hit {
                        density.retire_row(matrix.row(r));
                        break (
                            r,
                            PivotOutcome::Found {
                                pivot_col: pivot_count,
                            },
                        );
                    }
                }

                let mut found = None;
                for &r in &candidates {
                    match search_pivot(&ring, matrix.row_mut(r), pivot_count, &mut density) {
                        PivotOutcome::NoUnit => {}
                        outcome => {
                            found = Some((r, outcome));
                            break;
                        }
                    }
                }
                if let Some(hit) = found {
                    break hit;
                }

                // Dividing: every remaining entry is a multiple of p.
                divide_rows(matrix, k, prime);
                ring = ring.descend();
                ranks.push(pivot_count);
                observer.on_rank_breakpoint(ranks.len() as u32, pivot_count);
            };

            if chosen_row != k {
                matrix.swap_rows(chosen_row, k);
            }

            if let PivotOutcome::Found { pivot_col } = outcome {
                pivot_count += 1;
                let frontier = pivot_count - 1;
                if pivot_col != frontier {
                    q.transpose(frontier, pivot_col);
                }

                // Eliminating: cancel the frontier column in every row
                // below the pivot.
                let (upper, lower) = matrix.rows_mut().split_at_mut(k + 1);
                let pivot_row = &upper[k];
                for target in lower.iter_mut() {
                    eliminate_row(
                        &ring,
                        target,
                        pivot_row,
                        frontier,
                        pivot_col,
                        &mut density,
                        &mut scratch,
                    );
                }
            }
            // An empty row is swapped into place and consumes no column.

            if !self.options.preserve_upper {
                *matrix.row_mut(k) = SparseRow::new();
            }
        }

        // The final row reduces the leftover nilpotent structure: keep
        // dividing until it yields its pivot or the modulus runs out.
        let mut outcome = if self.options.prefer_same_column
            && same_column_pivot(&ring, matrix.row(last), pivot_count)
        {
            density.retire_row(matrix.row(last));
            PivotOutcome::Found {
                pivot_col: pivot_count,
            }
        } else {
            search_pivot(&ring, matrix.row_mut(last), pivot_count, &mut density)
        };

        while outcome == PivotOutcome::NoUnit {
            ranks.push(pivot_count);
            observer.on_rank_breakpoint(ranks.len() as u32, pivot_count);
            for entry in matrix.row_mut(last).iter_mut() {
                entry.1 /= prime;
            }
            ring = ring.descend();
            outcome = search_pivot(&ring, matrix.row_mut(last), pivot_count, &mut density);
        }

        if let PivotOutcome::Found { pivot_col } = outcome {
            pivot_count += 1;
            let frontier = pivot_count - 1;
            if pivot_col != frontier {
                q.transpose(frontier, pivot_col);
            }
        }

        while !ring.is_trivial() {
            ring = ring.descend();
            ranks.push(pivot_count);
        }
        observer.on_progress(num_rows, num_rows);

        PowerGaussResult {
            ranks,
            permutation: q,
        }
    }
}

/// Divides every entry of rows `from_row..` by p. Called only when all
/// those entries are multiples of p, so no entry becomes zero.
fn divide_rows(matrix: &mut SparseMatrix, from_row: usize, prime: i64) {
    for r in from_row..matrix.num_rows() {
        for entry in matrix.row_mut(r).iter_mut() {
            entry.1 /= prime;
        }
    }
}
