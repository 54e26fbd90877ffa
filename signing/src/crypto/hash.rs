//! # Hashing Utilities
//!
//! SHA-256 helpers and the Schnorr challenge hash. Zephyr is a SHA-256
//! protocol throughout: addresses, transaction digests, and the Fiat–Shamir
//! challenge all use it. No second hash function, no configuration knob —
//! the challenge construction is a network-wide compatibility contract and
//! agility here would only be a way to break it.
//!
//! ## The challenge concatenation
//!
//! The signature challenge binds three things: the commitment point, the
//! signer's public key, and the message. They are concatenated in that
//! exact order with **no** separators and **no** length prefixes:
//!
//! ```text
//! e = SHA-256( R_compressed || Q[..33] || message )
//! ```
//!
//! Signer and verifier must reproduce this byte-for-byte or every signature
//! fails to verify. The public key contribution is always 33 bytes — the
//! compressed encoding — even when the caller happens to hold an
//! uncompressed key. See [`schnorr_challenge`].

use sha2::{Digest, Sha256};

use crate::config::COMPRESSED_PUBLIC_KEY_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// Returns a fixed 32-byte digest. This is the only hash primitive in the
/// crate; addresses and challenges are both built on it.
///
/// # Example
///
/// ```
/// use zephyr_signing::crypto::sha256;
///
/// let digest = sha256(b"zephyr");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Compute the Schnorr challenge digest: `SHA-256(R || Q[..33] || message)`.
///
/// `r_compressed` is the 33-byte compressed commitment point and `q_prefix`
/// the first 33 bytes of the signer's public key encoding. Only the first
/// 33 bytes of `q_prefix` are hashed; the engine always passes a compressed
/// encoding so those 33 bytes *are* the full key.
///
/// The inputs are fed to the hasher sequentially rather than concatenated
/// into a temporary buffer. Same bytes, no allocation.
///
/// The return value is the raw digest. Reduction mod the group order is the
/// engine's job — this function is also used by test fixtures that pin the
/// unreduced digest.
pub fn schnorr_challenge(r_compressed: &[u8], q_prefix: &[u8], message: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(r_compressed);
    hasher.update(&q_prefix[..COMPRESSED_PUBLIC_KEY_LENGTH]);
    hasher.update(message);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}
