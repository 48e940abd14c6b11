//! Content fingerprinting.
//!
//! The engine never hashes anything itself; whoever builds the snapshot
//! supplies a [`ContentHasher`] and the resulting fingerprints travel
//! with the entries. The only requirement is purity: identical content
//! must produce identical fingerprints no matter which side it sits on.
//! Move detection additionally assumes collisions are negligible in
//! practice, which BLAKE3 comfortably provides.

/// A pure content-to-fingerprint function.
pub trait ContentHasher: Send + Sync {
    /// Fingerprint a file's text content.
    fn fingerprint(&self, content: &str) -> String;
}

/// Default hasher: BLAKE3, hex encoded (64 characters).
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl ContentHasher for Blake3Hasher {
    fn fingerprint(&self, content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }
}
