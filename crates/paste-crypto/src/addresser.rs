use sha2::{Digest, Sha256};

use paste_types::{Address, FullId};

/// SHA-256 content addresser.
///
/// Unlike a domain-separated hasher, the digest is taken over the raw bytes
/// with nothing prepended, so a paste's id equals `sha256sum` of its content
/// and stays compatible with pastes already on disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentAddresser;

impl ContentAddresser {
    /// Derive both identifiers for `content`. Never fails; empty input is fine.
    pub fn address(content: &[u8]) -> Address {
        Address::from(Self::full_id(content))
    }

    /// Digest only.
    pub fn full_id(content: &[u8]) -> FullId {
        let digest: [u8; 32] = Sha256::digest(content).into();
        FullId::from_digest(digest)
    }

    /// Verify that `content` hashes to `expected`.
    pub fn verify(content: &[u8], expected: &FullId) -> bool {
        Self::full_id(content) == *expected
    }
}
