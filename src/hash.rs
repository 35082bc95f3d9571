//! Domain-separated hashing over group elements.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::group::ElementModP;

/// SHA-256 digest over the canonical byte encodings of one or more elements,
/// preceded by a domain-separation tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest32([u8; 32]);

impl Digest32 {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

const CIPHERTEXT_HASH_TAG: u8 = 0x01;

/// Hashes a ciphertext's `(pad, data)` pair: tag, then each field's canonical
/// big-endian bytes, then finalize.
pub fn hash_ciphertext(pad: &ElementModP, data: &ElementModP) -> Digest32 {
    Digest32(
        Sha256::new()
            .chain_update([CIPHERTEXT_HASH_TAG])
            .chain_update(pad.to_bytes())
            .chain_update(data.to_bytes())
            .finalize()
            .into(),
    )
}

/// Hashes an arbitrary nonempty sequence of elements under the same tag,
/// used by multi-key combination to fingerprint a joint public key.
pub fn hash_elements<'a>(elements: impl IntoIterator<Item = &'a ElementModP>) -> Digest32 {
    let mut hasher = Sha256::new().chain_update([CIPHERTEXT_HASH_TAG]);
    for element in elements {
        hasher.update(element.to_bytes());
    }
    Digest32(hasher.finalize().into())
}
