//! The hash seam selector/topic/checksum computation is built on (§5).
//!
//! A `Digest` instance is not safe for concurrent use; callers needing one
//! per thread construct a fresh [`Keccak`] (zero-sized, so this costs
//! nothing) rather than sharing one across calls.

/// A 256-bit hash function over an arbitrary byte sequence.
pub trait Digest {
    /// Hash `data`, returning the 32-byte digest.
    fn keccak256(&self, data: &[u8]) -> [u8; 32];
}

/// The default [`Digest`]: Ethereum's Keccak-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak;

impl Digest for Keccak {
    fn keccak256(&self, data: &[u8]) -> [u8; 32] {
        crate::crypto::keccak256(data).to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_digest_matches_crypto_module() {
        let digest = Keccak;
        assert_eq!(digest.keccak256(b"hello"), crate::crypto::keccak256(b"hello").to_bytes());
    }
}
