//! Cryptographically secure randomness used for nonces and secret keys.

use rand::rngs::OsRng;
use rand::RngCore;

/// Fills `buf` with bytes from the process's CSPRNG.
pub(crate) fn fill_secure(buf: &mut [u8]) {
    OsRng.fill_bytes(buf);
}
