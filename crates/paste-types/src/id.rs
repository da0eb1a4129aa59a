use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Number of hex characters in a rendered [`FullId`].
pub const FULL_ID_HEX_LEN: usize = 64;

/// Number of hex characters in a rendered [`ShortId`].
pub const SHORT_ID_HEX_LEN: usize = 8;

const SHORT_ID_BYTES: usize = SHORT_ID_HEX_LEN / 2;

/// Content-addressed identifier of a stored paste.
///
/// A `FullId` is the SHA-256 digest of the paste's bytes. Identical content
/// always produces the same `FullId`, which is what makes write-time
/// deduplication safe. The byte ordering matches the ordering of the
/// lowercase hex rendering, so sorted `FullId`s are also sorted as strings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FullId([u8; 32]);

impl FullId {
    /// Wrap a pre-computed 32-byte digest.
    pub const fn from_digest(digest: [u8; 32]) -> Self {
        Self(digest)
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The abbreviated identifier: the first 8 hex characters.
    pub fn short(&self) -> ShortId {
        let mut prefix = [0u8; SHORT_ID_BYTES];
        prefix.copy_from_slice(&self.0[..SHORT_ID_BYTES]);
        ShortId(prefix)
    }

    /// Returns `true` if this id's hex rendering starts with `short`.
    pub fn starts_with(&self, short: &ShortId) -> bool {
        self.0[..SHORT_ID_BYTES] == short.0
    }

    /// Parse from a 64-character hex string. Either case is accepted.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        if s.len() != FULL_ID_HEX_LEN {
            return Err(TypeError::InvalidLength {
                expected: FULL_ID_HEX_LEN,
                actual: s.len(),
            });
        }
        let mut arr = [0u8; 32];
        hex::decode_to_slice(s, &mut arr).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for FullId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FullId({})", self.short())
    }
}

impl fmt::Display for FullId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for FullId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 32]> for FullId {
    fn from(digest: [u8; 32]) -> Self {
        Self(digest)
    }
}

impl From<FullId> for [u8; 32] {
    fn from(id: FullId) -> Self {
        id.0
    }
}

impl Serialize for FullId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FullId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Abbreviated identifier: the first 8 hex characters of a [`FullId`].
///
/// Not unique. Several stored pastes may share a `ShortId`; resolving one
/// is the store's job and is governed by its short-id policy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortId([u8; SHORT_ID_BYTES]);

impl ShortId {
    /// Lowercase hex rendering (8 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The prefix bytes.
    pub fn as_bytes(&self) -> &[u8; SHORT_ID_BYTES] {
        &self.0
    }

    /// The smallest [`FullId`] carrying this prefix. Range scans over a
    /// sorted id set start here.
    pub fn lower_bound(&self) -> FullId {
        let mut arr = [0u8; 32];
        arr[..SHORT_ID_BYTES].copy_from_slice(&self.0);
        FullId(arr)
    }

    /// Parse from an 8-character hex string. Either case is accepted.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        if s.len() != SHORT_ID_HEX_LEN {
            return Err(TypeError::InvalidLength {
                expected: SHORT_ID_HEX_LEN,
                actual: s.len(),
            });
        }
        let mut arr = [0u8; SHORT_ID_BYTES];
        hex::decode_to_slice(s, &mut arr).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortId({})", self.to_hex())
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ShortId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ShortId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ShortId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HELLO: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn hex_roundtrip() {
        let id = FullId::from_hex(HELLO).unwrap();
        assert_eq!(id.to_hex(), HELLO);
        assert_eq!(id.to_string(), HELLO);
    }

    #[test]
    fn uppercase_is_normalized() {
        let id = FullId::from_hex(&HELLO.to_uppercase()).unwrap();
        assert_eq!(id.to_hex(), HELLO);
    }

    #[test]
    fn short_is_first_eight_chars() {
        let id = FullId::from_hex(HELLO).unwrap();
        assert_eq!(id.short().to_hex(), "2cf24dba");
        assert!(id.starts_with(&id.short()));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            FullId::from_hex("abcd"),
            Err(TypeError::InvalidLength {
                expected: 64,
                actual: 4
            })
        );
        assert!(matches!(
            ShortId::from_hex(HELLO),
            Err(TypeError::InvalidLength { expected: 8, .. })
        ));
    }

    #[test]
    fn non_hex_is_rejected() {
        let bad = "z".repeat(64);
        assert!(matches!(FullId::from_hex(&bad), Err(TypeError::InvalidHex(_))));
        assert!(matches!(
            ShortId::from_hex("2cf24dbg"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn lower_bound_is_smallest_with_prefix() {
        let short = ShortId::from_hex("2cf24dba").unwrap();
        let lb = short.lower_bound();
        assert!(lb.starts_with(&short));
        assert_eq!(&lb.to_hex()[8..], "0".repeat(56));
        assert!(lb <= FullId::from_hex(HELLO).unwrap());
    }

    #[test]
    fn debug_shows_short_form() {
        let id = FullId::from_hex(HELLO).unwrap();
        assert_eq!(format!("{id:?}"), "FullId(2cf24dba)");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let id = FullId::from_hex(HELLO).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{HELLO}\""));
        let parsed: FullId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);

        let short: ShortId = serde_json::from_str("\"2cf24dba\"").unwrap();
        assert_eq!(short, id.short());
        assert!(serde_json::from_str::<ShortId>("\"xyz\"").is_err());
    }

    proptest! {
        #[test]
        fn byte_order_matches_hex_order(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            let (a, b) = (FullId::from_digest(a), FullId::from_digest(b));
            prop_assert_eq!(a.cmp(&b), a.to_hex().cmp(&b.to_hex()));
        }

        #[test]
        fn short_is_hex_prefix(digest in any::<[u8; 32]>()) {
            let id = FullId::from_digest(digest);
            prop_assert_eq!(id.short().to_hex(), id.to_hex()[..8].to_string());
        }
    }
}
