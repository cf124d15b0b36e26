//! Content-identity hashing.
//!
//! A canonical key is reduced to a fixed 32-byte BLAKE3 digest before it is
//! used as the aggregation index. The digest is unkeyed and deterministic:
//! the same key always hashes the same, across runs and platforms. It is not
//! security-sensitive; collisions are treated as identity equality and not
//! guarded against.

use super::key::CanonicalKey;

/// Fixed-width digest of a canonical key.
pub type IdentityHash = [u8; 32];

/// Hash a canonical key into its content identity.
#[must_use]
pub fn identity_hash(key: &CanonicalKey) -> IdentityHash {
    *blake3::hash(key.as_str().as_bytes()).as_bytes()
}

/// Render an identity hash as lowercase hexadecimal.
#[must_use]
pub fn hash_to_hex(hash: &IdentityHash) -> String {
    let mut out = String::with_capacity(64);
    for byte in hash {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
