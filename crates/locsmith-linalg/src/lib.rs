//! # locsmith-linalg
//!
//! Sparse Gaussian elimination modulo prime powers.
//!
//! This crate provides:
//! - Sparse matrices as ordered lists of compressed rows
//! - A bulk triplet builder and incremental sorted updates
//! - Fill-in-aware pivot search over a column density tracker
//! - Row elimination under a prime-power (non-field) modulus
//! - The prime-power lifting loop producing a rank sequence
//! - Local Smith form extraction from rank sequences
//!
//! ## Algorithm
//!
//! Elimination runs modulo p^e. Pivots must be units of the residue
//! ring; when none remain, every live entry is divided by p, the rank
//! reached is recorded, and elimination continues one modulus level
//! down. The recorded rank sequence at p, p^2, ..., p^e yields the
//! invariant factors of the matrix locally at p.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod density;
pub mod elimination;
pub mod permutation;
pub mod pivot;
pub mod power_gauss;
pub mod smith_form;
pub mod sparse_matrix;

pub use density::ColumnDensity;
pub use elimination::{eliminate_row, Scratch};
pub use permutation::Permutation;
pub use pivot::{same_column_pivot, search_pivot, PivotOutcome};
pub use power_gauss::{
    GaussOptions, PowerGauss, PowerGaussResult, ProgressObserver, RankSequence, SilentObserver,
};
pub use smith_form::LocalSmithForm;
pub use sparse_matrix::{BuildError, SparseMatrix, SparseRow, TripletBuilder};
