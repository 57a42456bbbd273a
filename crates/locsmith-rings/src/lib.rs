//! # locsmith-rings
//!
//! Residue ring arithmetic modulo prime powers for Locsmith.
//!
//! This crate provides [`PowerRing`], the ring Z/p^e Z with a runtime
//! modulus. Unlike a prime field, a prime-power ring contains zero
//! divisors, so inversion is restricted to units (elements not divisible
//! by p) and is computed with an extended-Euclid variant rather than
//! Fermat exponentiation, which is only valid for prime moduli.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod power_ring;

#[cfg(test)]
mod proptests;

pub use power_ring::{ModulusError, PowerRing};
