//! Cryptographic core of an ElectionGuard-style additively-homomorphic
//! election encryption library: group arithmetic over a safe prime and its
//! prime-order subgroup, a fixed-base exponentiation accelerator, a
//! memoized discrete-log solver, and exponential ElGamal on top of them.

mod dlog;
pub mod elgamal;
pub mod error;
pub mod group;
pub mod hash;
pub mod params;
pub mod pow_radix;
mod rng;

pub use elgamal::{combine_partial_decryptions, combine_public_keys, ElGamalCiphertext, ElGamalKeypair, PublicKeyExt};
pub use error::{Error, Result};
pub use group::{ElementModP, ElementModQ, GroupContext};
pub use params::ParamSet;
pub use pow_radix::PowRadixOption;
