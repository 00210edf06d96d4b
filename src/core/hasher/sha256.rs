//! SHA-256-backed slow digest.

use sha2::{Digest, Sha256};

use super::traits::SlowDigest;

/// SHA-256 digest rendered as 64 hex characters.
///
/// Stands in for the rate-limited external digest service. The
/// implementation itself is pure; the pipeline's serialization gate is
/// what keeps calls exclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl SlowDigest for Sha256Digest {
    fn digest(&self, input: &str) -> String {
        let hash = Sha256::digest(input.as_bytes());
        hash.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
