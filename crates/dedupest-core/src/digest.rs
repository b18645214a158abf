//! Block content fingerprints.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// SHA-1 content digest of a single block.
///
/// Two blocks with equal digests are treated as identical content; the
/// collision probability of the 160-bit digest is negligible for counting
/// purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockDigest(pub [u8; 20]);

impl BlockDigest {
    /// Create a digest from raw bytes.
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Compute the digest of a block's content.
    ///
    /// The caller must pass exactly the bytes that were read for the block:
    /// a short final block is hashed over only its real bytes, never padded
    /// and never extended with leftovers from a reused buffer.
    pub fn of(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);
        Self(hasher.finalize().into())
    }

    /// Get the digest as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // SHA-1("abc")
        assert_eq!(
            BlockDigest::of(b"abc").to_hex(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_content_sensitivity() {
        let a = BlockDigest::of(&[0u8; 512]);
        let b = BlockDigest::of(&[0u8; 512]);
        let c = BlockDigest::of(&[1u8; 512]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_length_sensitivity() {
        // A short block must not hash equal to a zero-extended one.
        let short = BlockDigest::of(&[0xaa; 100]);
        let mut padded = vec![0xaa; 100];
        padded.resize(512, 0);
        assert_ne!(short, BlockDigest::of(&padded));
    }

    #[test]
    fn test_hex_length() {
        let digest = BlockDigest::new([0xab; 20]);
        assert_eq!(digest.to_hex().len(), 40);
        assert!(digest.to_hex().starts_with("abab"));
    }
}
