//! # Deterministic Nonce Derivation
//!
//! The per-signature scalar `k` is the single most dangerous value in the
//! whole protocol: reuse `k` across two different messages under the same
//! key and anyone can recover the private key by solving two linear
//! equations in two unknowns. (Ask Sony how that went in 2010.)
//!
//! Instead of trusting a raw CSPRNG draw, Zephyr derives `k` through an
//! HMAC-DRBG seeded with three inputs:
//!
//! 1. **entropy** — a fresh 32-byte secret draw, the DRBG seed material;
//! 2. **the message** — the exact bytes being signed, as the DRBG nonce;
//! 3. **a fixed personalization label** — [`crate::config::DRN_PERSONALIZATION`],
//!    identifying the scheme and hash in use.
//!
//! Tying derivation to the message means the same message under the same
//! entropy always yields the same `k`, while different messages yield
//! independent-looking nonces — the nonce-reuse hole of naive randomness is
//! closed by construction.
//!
//! The DRBG itself (NIST SP 800-90A, HMAC variant) comes from the
//! `hmac-drbg` crate. We only seed it and ask for 32 bytes; reimplementing
//! it here would be a liability, not a feature.

use generic_array::typenum::U32;
use hmac_drbg::HmacDRBG;
use sha2::Sha256;
use thiserror::Error;

use crate::config::DRN_PERSONALIZATION;

/// Errors during nonce derivation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrnError {
    /// The entropy input was all zeros. A DRBG seeded from zero entropy
    /// produces predictable output, which for a signature nonce means a
    /// leaked private key — so we fail loudly instead of deriving anything.
    #[error("insufficient entropy: all-zero seed material")]
    InsufficientEntropy,
}

/// Derive a 32-byte candidate nonce from entropy and the message to sign.
///
/// Deterministic in its inputs: same `(entropy, message)` pair, same output,
/// always. The caller is responsible for drawing fresh entropy per signing
/// attempt and for range-checking the result against the group order — a
/// uniformly random 32-byte string is ever so slightly able to land on 0 or
/// above n, and this function does not know about the curve.
///
/// # Errors
///
/// [`DrnError::InsufficientEntropy`] if `entropy` is all zeros. There is no
/// legitimate code path that produces zero entropy; seeing it means the
/// platform RNG is broken and signing must stop.
pub fn generate_nonce(entropy: &[u8; 32], message: &[u8]) -> Result<[u8; 32], DrnError> {
    if entropy.iter().all(|&b| b == 0) {
        return Err(DrnError::InsufficientEntropy);
    }

    let mut drbg = HmacDRBG::<Sha256>::new(entropy, message, DRN_PERSONALIZATION);
    Ok(drbg.generate::<U32>(None).into())
}
