//! # Locsmith
//!
//! Exact rank and local Smith normal form of sparse integer matrices,
//! computed by Gaussian elimination modulo prime powers.
//!
//! ## Features
//!
//! - **Sparse Rows**: Matrices as ordered lists of compressed rows
//! - **Prime-Power Rings**: Arithmetic and exact inversion in Z/p^e Z
//! - **Fill-In-Aware Pivoting**: Column density guides pivot choice
//! - **Modulus Lifting**: One elimination run yields the rank at every
//!   power p, p^2, ..., p^e
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use locsmith::prelude::*;
//!
//! let ring = PowerRing::new(2, 4)?;
//! let mut matrix = SparseMatrix::from_dense(&rows);
//! let result = PowerGauss::new(ring, GaussOptions::default())
//!     .rank_sequence(&mut matrix);
//! let snf = LocalSmithForm::from_rank_sequence(2, &result.ranks);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use locsmith_linalg as linalg;
pub use locsmith_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use locsmith_linalg::{
        GaussOptions, LocalSmithForm, PowerGauss, PowerGaussResult, SparseMatrix, TripletBuilder,
    };
    pub use locsmith_rings::{ModulusError, PowerRing};
}
