//! Exponential ElGamal: key derivation, encryption, decryption, homomorphic
//! addition, and threshold partial decryption.

use std::sync::Arc;

use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::group::{ElementModP, ElementModQ, GroupContext};

/// A secret/public keypair. The secret is an [`ElementModQ`] with residue
/// `>= 2`; the public key is `G^secret mod P`.
pub struct ElGamalKeypair {
    secret: ElementModQ,
    public_key: ElementModP,
}

impl ElGamalKeypair {
    /// Fails with [`Error::InvalidArgument`] if `secret < 2`.
    pub fn from_secret(context: &Arc<GroupContext>, secret: ElementModQ) -> Result<Self> {
        if secret.value() < &crypto_bigint::U256::from_u64(2) {
            return Err(Error::InvalidArgument("secret key must be >= 2"));
        }
        let public_key = context.g_pow_p(&secret)?;
        Ok(ElGamalKeypair { secret, public_key })
    }

    /// Draws a secret uniformly in `[2, Q)` via the secure RNG.
    pub fn from_random(context: &Arc<GroupContext>) -> Result<Self> {
        let secret = context.random_element_mod_q(2);
        Self::from_secret(context, secret)
    }

    pub fn public_key(&self) -> &ElementModP {
        &self.public_key
    }

    pub fn secret(&self) -> &ElementModQ {
        &self.secret
    }

    /// `blind = pad^secret`; `data / blind = G^m`; recovers `m` via `DLog`.
    /// `None` iff the plaintext exceeds the context's `DLog` cap.
    pub fn decrypt(&self, ciphertext: &ElGamalCiphertext) -> Result<Option<u64>> {
        let blind = ciphertext.pad.pow_p(&self.secret)?;
        let g_pow_m = ciphertext.data.div(&blind)?;
        Ok(ciphertext.pad.context().dlog(&g_pow_m))
    }

    /// `pad^secret mod P`, one share-holder's contribution toward a
    /// threshold decryption.
    pub fn partial_decryption(&self, ciphertext: &ElGamalCiphertext) -> Result<ElementModP> {
        ciphertext.pad.pow_p(&self.secret)
    }
}

/// `(pad, data) = (G^n, G^m * publicKey^n)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElGamalCiphertext {
    pub pad: ElementModP,
    pub data: ElementModP,
}

impl ElGamalCiphertext {
    /// Homomorphic addition: `(pad1*pad2, data1*data2)`, which decrypts to
    /// `m1 + m2` when both ciphertexts were produced under the same key.
    pub fn add(&self, other: &Self) -> Result<ElGamalCiphertext> {
        Ok(ElGamalCiphertext {
            pad: self.pad.mul(&other.pad)?,
            data: self.data.mul(&other.data)?,
        })
    }

    /// Sums an iterable of ciphertexts. Fails with
    /// [`Error::InvalidArgument`] on an empty input, since there is no
    /// neutral ciphertext without a public key to build one from.
    pub fn sum<'a>(mut ciphertexts: impl Iterator<Item = &'a ElGamalCiphertext>) -> Result<ElGamalCiphertext> {
        let first = ciphertexts
            .next()
            .ok_or(Error::InvalidArgument("cannot sum an empty list of ciphertexts"))?;
        ciphertexts.try_fold(first.clone(), |acc, c| acc.add(c))
    }

    /// Decrypts using a known nonce instead of the secret key. Equivalent to
    /// the secret-key path for ciphertexts produced by `encrypt(_, n)`.
    pub fn decrypt_with_nonce(&self, public_key: &ElementModP, nonce: &ElementModQ) -> Result<Option<u64>> {
        let blind = public_key.pow_p(nonce)?;
        let g_pow_m = self.data.div(&blind)?;
        Ok(self.pad.context().dlog(&g_pow_m))
    }
}

/// Extension trait over a public key, mirroring the reference API's
/// `publicKey.encrypt(...)` / `publicKey.decryptWithNonce(...)` call shape.
pub trait PublicKeyExt {
    fn encrypt(&self, context: &Arc<GroupContext>, message: u64, nonce: Option<ElementModQ>) -> Result<ElGamalCiphertext>;
}

impl PublicKeyExt for ElementModP {
    /// `pad = G^n`, `data = G^m * publicKey^n`. Fails with
    /// [`Error::InvalidArgument`] if an explicit nonce is zero.
    fn encrypt(&self, context: &Arc<GroupContext>, message: u64, nonce: Option<ElementModQ>) -> Result<ElGamalCiphertext> {
        let nonce = match nonce {
            Some(n) => {
                if !n.in_bounds_no_zero() {
                    return Err(Error::InvalidArgument("encryption nonce must be nonzero"));
                }
                n
            }
            None => context.random_element_mod_q(1),
        };
        let pad = context.g_pow_p(&nonce)?;
        let g_pow_m = context.g_pow_p_small(message)?;
        let shared_secret = self.pow_p(&nonce)?;
        let data = g_pow_m.mul(&shared_secret)?;
        Ok(ElGamalCiphertext { pad, data })
    }
}

/// Element-wise product of multiple public keys, the joint key under which
/// a ciphertext can only be decrypted by combining every share's partial
/// decryption.
pub fn combine_public_keys<'a>(mut keys: impl Iterator<Item = &'a ElementModP>) -> Result<ElementModP> {
    let first = keys
        .next()
        .ok_or(Error::InvalidArgument("cannot combine an empty list of public keys"))?;
    keys.try_fold(first.clone(), |acc, k| acc.mul(k))
}

/// Recovers `m` from `ciphertext.data / (partial_1 * partial_2 * ...)`, given
/// partial decryptions whose underlying secrets sum to the joint secret used
/// to produce `combine_public_keys`.
pub fn combine_partial_decryptions<'a>(
    ciphertext: &ElGamalCiphertext,
    partials: impl Iterator<Item = &'a ElementModP>,
) -> Result<Option<u64>> {
    let mut partials = partials.peekable();
    let first = partials
        .next()
        .ok_or(Error::InvalidArgument("cannot combine an empty list of partial decryptions"))?;
    let product = partials.try_fold(first.clone(), |acc, p| acc.mul(p))?;
    let g_pow_m = ciphertext.data.div(&product)?;
    Ok(ciphertext.pad.context().dlog(&g_pow_m))
}

impl Drop for ElGamalKeypair {
    fn drop(&mut self) {
        self.secret.value_mut().zeroize();
    }
}
