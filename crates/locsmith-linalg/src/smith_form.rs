//! Local Smith normal form at a prime, derived from a rank sequence.
//!
//! The rank gained between modulus levels p^i and p^(i+1) counts the
//! invariant factors equal to p^i: consecutive differences of the rank
//! sequence therefore give the multiplicity of each power of p among
//! the invariant factors.

use crate::power_gauss::RankSequence;

/// Invariant factors of a matrix, locally at one prime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSmithForm {
    prime: i64,
    factors: Vec<(usize, i64)>,
    rank: usize,
}

impl LocalSmithForm {
    /// Derives the local Smith form from a rank sequence at `prime`.
    ///
    /// `ranks[i]` must be the rank modulo `prime^(i+1)`, as produced by
    /// [`crate::PowerGauss::rank_sequence`].
    #[must_use]
    pub fn from_rank_sequence(prime: i64, ranks: &RankSequence) -> Self {
        let mut factors = Vec::new();
        let mut modulus: i64 = 1;
        let mut previous = 0;
        for &rank in ranks {
            let multiplicity = rank - previous;
            if multiplicity > 0 {
                factors.push((multiplicity, modulus));
            }
            modulus *= prime;
            previous = rank;
        }
        Self {
            prime,
            factors,
            rank: ranks.last().copied().unwrap_or(0),
        }
    }

    /// The prime this local form was computed at.
    #[must_use]
    pub const fn prime(&self) -> i64 {
        self.prime
    }

    /// The rank modulo the full prime power.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Invariant factor groups `(multiplicity, p^i)`, by increasing
    /// power. A factor of 1 marks pivots invertible already modulo p.
    #[must_use]
    pub fn factors(&self) -> &[(usize, i64)] {
        &self.factors
    }

    /// All invariant factors in divisibility order, one per pivot.
    #[must_use]
    pub fn expanded(&self) -> Vec<i64> {
        self.factors
            .iter()
            .flat_map(|&(multiplicity, factor)| std::iter::repeat(factor).take(multiplicity))
            .collect()
    }
}
