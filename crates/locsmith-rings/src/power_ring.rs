//! The residue ring Z/p^e Z with a runtime modulus.
//!
//! Elimination modulo a prime power works over a ring, not a field:
//! multiples of p are zero divisors, and only elements coprime to p are
//! invertible. [`PowerRing`] packages the modulus together with the
//! ring operations the elimination engine needs.

use num_traits::checked_pow;
use std::fmt;
use thiserror::Error;

/// Errors raised when constructing a [`PowerRing`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModulusError {
    /// The prime must be at least 2.
    #[error("prime must be at least 2, got {0}")]
    PrimeTooSmall(i64),
    /// The exponent must be at least 1.
    #[error("exponent must be at least 1")]
    ZeroExponent,
    /// The modulus p^e must fit in a signed 64-bit integer.
    #[error("{prime}^{exponent} does not fit in 64 bits")]
    ModulusOverflow {
        /// The requested prime.
        prime: i64,
        /// The requested exponent.
        exponent: u32,
    },
}

/// The ring Z/p^e Z for a prime p and exponent e, both fixed at runtime.
///
/// Elements are canonical residues `0..modulus` stored as `i64`.
/// All products are computed through `i128` intermediates, so the
/// accumulator width always exceeds `modulus * value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerRing {
    modulus: i64,
    prime: i64,
    exponent: u32,
}

impl PowerRing {
    /// Creates the ring Z/p^e Z.
    ///
    /// # Errors
    ///
    /// Returns a [`ModulusError`] if `prime < 2`, `exponent == 0`, or
    /// `prime^exponent` overflows an `i64`.
    pub fn new(prime: i64, exponent: u32) -> Result<Self, ModulusError> {
        if prime < 2 {
            return Err(ModulusError::PrimeTooSmall(prime));
        }
        if exponent == 0 {
            return Err(ModulusError::ZeroExponent);
        }
        let modulus = checked_pow(prime, exponent as usize)
            .ok_or(ModulusError::ModulusOverflow { prime, exponent })?;
        Ok(Self {
            modulus,
            prime,
            exponent,
        })
    }

    /// Returns the modulus p^e. The trivial ring has modulus 1.
    #[must_use]
    pub const fn modulus(&self) -> i64 {
        self.modulus
    }

    /// Returns the prime p.
    #[must_use]
    pub const fn prime(&self) -> i64 {
        self.prime
    }

    /// Returns the exponent e.
    #[must_use]
    pub const fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Returns true once the modulus has been divided down to 1.
    #[must_use]
    pub const fn is_trivial(&self) -> bool {
        self.modulus == 1
    }

    /// The ring Z/p^(e-1) Z, one modulus-descent step down.
    ///
    /// Descending from Z/p Z yields the trivial ring with modulus 1.
    ///
    /// # Panics
    ///
    /// Panics if the ring is already trivial.
    #[must_use]
    pub fn descend(&self) -> Self {
        assert!(!self.is_trivial(), "cannot descend below modulus 1");
        Self {
            modulus: self.modulus / self.prime,
            prime: self.prime,
            exponent: self.exponent - 1,
        }
    }

    /// Maps an arbitrary integer to its canonical residue in `0..modulus`.
    #[must_use]
    pub fn reduce(&self, value: i64) -> i64 {
        value.rem_euclid(self.modulus)
    }

    /// Adds two canonical residues.
    #[must_use]
    pub fn add(&self, a: i64, b: i64) -> i64 {
        self.debug_check(a);
        self.debug_check(b);
        ((i128::from(a) + i128::from(b)) % i128::from(self.modulus)) as i64
    }

    /// Subtracts two canonical residues.
    #[must_use]
    pub fn sub(&self, a: i64, b: i64) -> i64 {
        self.add(a, self.neg(b))
    }

    /// Negates a canonical residue.
    #[must_use]
    pub fn neg(&self, a: i64) -> i64 {
        self.debug_check(a);
        if a == 0 {
            0
        } else {
            self.modulus - a
        }
    }

    /// Multiplies two canonical residues through an `i128` intermediate.
    #[must_use]
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        self.debug_check(a);
        self.debug_check(b);
        ((i128::from(a) * i128::from(b)) % i128::from(self.modulus)) as i64
    }

    /// Returns true if `value` is divisible by the prime p.
    ///
    /// Residues divisible by p are exactly the zero divisors of the ring
    /// (together with zero itself), so `!prime_divides(v)` identifies
    /// the units.
    #[must_use]
    pub const fn prime_divides(&self, value: i64) -> bool {
        value % self.prime == 0
    }

    /// Returns true if `value` is a unit of the ring.
    #[must_use]
    pub const fn is_unit(&self, value: i64) -> bool {
        !self.prime_divides(value)
    }

    /// Computes the multiplicative inverse of a unit.
    ///
    /// Uses a subtractive extended-Euclid scheme that tracks only the
    /// Bezout coefficient of `a` through non-negative continuants, so it
    /// stays correct when the modulus is a composite prime power. A
    /// Fermat-style exponentiation would silently produce garbage here.
    ///
    /// Returns `None` when `value` is not a unit.
    #[must_use]
    pub fn inverse(&self, value: i64) -> Option<i64> {
        self.debug_check(value);
        if value == 0 || self.prime_divides(value) {
            return None;
        }

        let mut u1: i64 = 1;
        let mut r0 = self.modulus;
        let mut r1 = value;

        let mut q = r0 / r1;
        r0 -= q * r1;
        if r0 == 0 {
            return Some(u1);
        }
        let mut u0 = q;

        q = r1 / r0;
        r1 -= q * r0;

        while r1 != 0 {
            u1 += q * u0;

            q = r0 / r1;
            r0 -= q * r1;
            if r0 == 0 {
                return Some(u1);
            }
            u0 += q * u1;

            q = r1 / r0;
            r1 -= q * r0;
        }

        Some(self.modulus - u0)
    }

    #[inline]
    fn debug_check(&self, value: i64) {
        debug_assert!(
            (0..self.modulus).contains(&value),
            "value {value} is not a canonical residue mod {}",
            self.modulus
        );
    }
}

impl fmt::Display for PowerRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z/{}^{}Z", self.prime, self.exponent)
    }
}
