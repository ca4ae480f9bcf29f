//! Content fingerprinting for render requests
//!
//! The fingerprint of a `(formula, density)` pair is the cache key and the
//! namespace for every transient file a request materializes. Same pair =
//! same hash, so a prior artifact can be reused and concurrent requests for
//! different content never collide on filenames.

use sha2::{Digest, Sha256};
use std::fmt;

/// Deterministic digest of a render request's semantic inputs.
///
/// 64 lowercase hex characters (SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// The hex digest as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename for this hash with the given extension, e.g. `<hash>.tex`
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the content hash of a `(formula, density)` pair.
///
/// The pair is serialized into a canonical byte form before hashing: the
/// formula's byte length as u64 little-endian, the formula bytes, then the
/// density as u32 little-endian. The length prefix keeps adjacent inputs
/// like `("ab1", 55)` and `("ab", 155)` from encoding to the same bytes.
pub fn fingerprint(formula: &str, density: u32) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update((formula.len() as u64).to_le_bytes());
    hasher.update(formula.as_bytes());
    hasher.update(density.to_le_bytes());

    ContentHash(hex::encode(hasher.finalize()))
}
