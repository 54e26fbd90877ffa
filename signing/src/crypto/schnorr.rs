//! # EC-Schnorr Signature Engine
//!
//! Signing and verification for the Zephyr network's signature scheme:
//! EC-Schnorr over secp256k1 in the BSI TR-03111 variant.
//!
//! ## The algorithm
//!
//! Signing a message `m` under private key `d` with public key `Q = d*G`:
//!
//! 1. derive a nonce `k` from fresh entropy and `m` (see [`super::drn`]);
//!    reject `k == 0` or `k >= n`;
//! 2. compute the commitment `R = k*G`, compressed to 33 bytes;
//! 3. compute the challenge `e = SHA-256(R || Q_compressed || m) mod n`;
//!    reject `e == 0`;
//! 4. compute the response `s = k - e*d mod n`; reject `s == 0`;
//! 5. the signature is `(r, s)` with `r = e`, both canonical 32-byte
//!    big-endian scalars.
//!
//! Note the **minus** in step 4. The textbook response is `k + e*d`; the
//! TR-03111 variant subtracts, so verification reconstructs the commitment
//! as `R' = s*G + r*Q` (because `s*G + r*Q = (k - e*d)*G + e*d*G = k*G`)
//! and accepts iff the recomputed challenge equals `r`.
//!
//! All scalar arithmetic is mod `n`, the curve group order — never mod `p`,
//! the field prime. Hash outputs are interpreted as big-endian unsigned
//! integers before reduction.
//!
//! ## Rejection handling
//!
//! A rejected nonce, challenge, or response aborts the *attempt*, not the
//! signing call: the engine draws fresh entropy and tries again, up to
//! [`crate::config::MAX_SIGN_ATTEMPTS`]. Retryable rejections are a
//! distinct internal type from fatal errors, so "try again with a new k"
//! can never be confused with "the caller's input is garbage".

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::{Field, PrimeField};
use k256::{FieldBytes, ProjectivePoint, Scalar, U256};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

use super::drn::{self, DrnError};
use super::hash::schnorr_challenge;
use super::keys::{PrivateKey, PublicKey};
use crate::config::{DRN_ENTROPY_LENGTH, MAX_SIGN_ATTEMPTS, SIGNATURE_LENGTH};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors during signing.
///
/// Verification never produces these — a signature that doesn't check out
/// is a plain `false`, not an error. Giving attackers a detailed oracle for
/// *why* verification failed is a bad idea.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchnorrError {
    /// A supplied nonce is zero or not below the group order.
    #[error("invalid scalar: nonce must be in [1, n-1]")]
    InvalidScalar,

    /// The challenge or the response reduced to zero for this nonce.
    /// Harmless and recoverable — retry with fresh entropy.
    #[error("degenerate challenge or response (reduced to zero)")]
    DegenerateChallenge,

    /// Every attempt within the retry budget was rejected. The budget is
    /// sized so this is unreachable with a functioning entropy source.
    #[error("signing retries exhausted; entropy source looks broken")]
    RetriesExhausted,

    /// Nonce derivation refused to run (e.g. all-zero entropy).
    #[error(transparent)]
    Nonce(#[from] DrnError),
}

/// Why a single signing attempt was rejected. Internal: every variant means
/// "draw a fresh nonce and go again", never "give up".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reject {
    /// Derived nonce was 0 or >= n.
    NonceOutOfRange,
    /// Challenge reduced to zero mod n.
    ZeroChallenge,
    /// Response `k - e*d` reduced to zero mod n.
    ZeroResponse,
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// An EC-Schnorr signature: the pair `(r, s)`.
///
/// Both components are canonical 32-byte big-endian scalars in `[0, n)`.
/// Fixed width always — leading zeros are part of the encoding, and the
/// wire format is the 128-character hex concatenation `hex(r) || hex(s)`.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// The challenge scalar `e`, serialized big-endian.
    pub r: [u8; 32],
    /// The response scalar `k - e*d mod n`, serialized big-endian.
    pub s: [u8; 32],
}

impl Signature {
    /// The 128-character lowercase hex wire form: `hex(r) || hex(s)`.
    pub fn to_hex(&self) -> String {
        format!("{}{}", hex::encode(self.r), hex::encode(self.s))
    }

    /// Parse the 128-character hex wire form.
    ///
    /// Length and hex validity only — scalar range is checked by
    /// [`SchnorrEngine::verify`], which treats out-of-range components as
    /// a failed verification rather than an error.
    pub fn from_hex(s: &str) -> Result<Self, SchnorrError> {
        let bytes = hex::decode(s).map_err(|_| SchnorrError::InvalidScalar)?;
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SchnorrError::InvalidScalar);
        }
        let mut r = [0u8; 32];
        let mut s_arr = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s_arr.copy_from_slice(&bytes[32..]);
        Ok(Self { r, s: s_arr })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

// ---------------------------------------------------------------------------
// SchnorrEngine
// ---------------------------------------------------------------------------

/// The signing and verification engine.
///
/// An explicit value, not a process-wide singleton: construct one and pass
/// it where it's needed. It holds no key material and no mutable state —
/// every operation is a pure function of its arguments plus (for signing)
/// the entropy source — so a single engine is safe to share across threads.
///
/// # Examples
///
/// ```
/// use zephyr_signing::crypto::{PrivateKey, SchnorrEngine};
///
/// let engine = SchnorrEngine::new();
/// let sk = PrivateKey::generate().unwrap();
/// let pk = sk.public_key();
///
/// let sig = engine.sign(&sk, &pk, b"pay the validator").unwrap();
/// assert!(engine.verify(&sig, &pk, b"pay the validator"));
/// assert!(!engine.verify(&sig, &pk, b"pay me instead"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SchnorrEngine {
    /// Signing attempt budget. Generous on purpose; see
    /// [`crate::config::MAX_SIGN_ATTEMPTS`] for the reasoning.
    max_attempts: usize,
}

impl SchnorrEngine {
    /// Create an engine with the standard retry budget.
    pub fn new() -> Self {
        Self {
            max_attempts: MAX_SIGN_ATTEMPTS,
        }
    }

    /// Sign a message, drawing nonce entropy from the OS CSPRNG.
    ///
    /// The message is opaque bytes — in Zephyr it is always the canonical
    /// transaction encoding, but the engine doesn't know or care.
    ///
    /// # Errors
    ///
    /// Only for a broken entropy source ([`SchnorrError::RetriesExhausted`]
    /// or a propagated [`DrnError`]). There is no input-dependent failure:
    /// the private key was range-validated at construction.
    pub fn sign(
        &self,
        private_key: &PrivateKey,
        public_key: &PublicKey,
        message: &[u8],
    ) -> Result<Signature, SchnorrError> {
        self.sign_with_rng(private_key, public_key, message, &mut OsRng)
    }

    /// Sign with a caller-provided entropy source.
    ///
    /// Given the same RNG state, key, and message, the output is
    /// byte-identical — nonce derivation is deterministic in the drawn
    /// entropy and the message. Tests use this with a seeded RNG.
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        private_key: &PrivateKey,
        public_key: &PublicKey,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Signature, SchnorrError> {
        let d = private_key.as_scalar();
        let q_compressed = public_key.to_compressed();

        let mut entropy = [0u8; DRN_ENTROPY_LENGTH];
        for attempt in 0..self.max_attempts {
            rng.fill_bytes(&mut entropy);
            let k_bytes = drn::generate_nonce(&entropy, message)?;

            match try_sign(&d, &q_compressed, &k_bytes, message) {
                Ok(sig) => {
                    trace!(attempts = attempt + 1, "signature produced");
                    return Ok(sig);
                }
                Err(reject) => {
                    // ~2^-128 per cause; seeing this at all is noteworthy.
                    debug!(?reject, attempt, "signing attempt rejected, redrawing nonce");
                }
            }
        }

        Err(SchnorrError::RetriesExhausted)
    }

    /// One signing attempt with an explicit nonce. No retry, no entropy.
    ///
    /// Exists for the known-answer tests, which pin `(r, s)` for a fixed
    /// `k`. Deliberately not public: handing callers control of `k` is how
    /// nonce-reuse bugs are born.
    pub(crate) fn sign_with_nonce(
        &self,
        private_key: &PrivateKey,
        public_key: &PublicKey,
        k_bytes: &[u8; 32],
        message: &[u8],
    ) -> Result<Signature, SchnorrError> {
        try_sign(
            &private_key.as_scalar(),
            &public_key.to_compressed(),
            k_bytes,
            message,
        )
        .map_err(|reject| match reject {
            Reject::NonceOutOfRange => SchnorrError::InvalidScalar,
            Reject::ZeroChallenge | Reject::ZeroResponse => SchnorrError::DegenerateChallenge,
        })
    }

    /// Verify a signature. Returns `true` iff it is valid for this key and
    /// message.
    ///
    /// Reconstructs the commitment as `R' = s*G + r*Q`, recomputes the
    /// challenge over `R'`, and compares it with `r`. Both sides of the
    /// comparison are canonical 32-byte big-endian scalars — `r` is parsed
    /// with a strict range check and the challenge is reduced mod n — so
    /// there are no width-mismatch false negatives and no acceptance of
    /// non-canonical encodings.
    ///
    /// Never returns an error: malformed components (out-of-range scalars,
    /// identity commitment) are simply invalid signatures.
    pub fn verify(&self, signature: &Signature, public_key: &PublicKey, message: &[u8]) -> bool {
        // Reject non-canonical r/s rather than reducing them; a reduced
        // reading would make two distinct byte strings verify for the same
        // signature.
        let Some(r) = canonical_scalar(&signature.r) else {
            return false;
        };
        let Some(s) = canonical_scalar(&signature.s) else {
            return false;
        };

        // R' = s*G + r*Q. For a valid signature this is k*G, the original
        // commitment.
        let r_point = ProjectivePoint::GENERATOR * s + public_key.to_point() * r;
        if r_point == ProjectivePoint::IDENTITY {
            return false;
        }

        let r_encoded = r_point.to_affine().to_encoded_point(true);
        let digest = schnorr_challenge(r_encoded.as_bytes(), &public_key.to_compressed(), message);
        let e = <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(&digest));

        e == r
    }
}

impl Default for SchnorrEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Parse 32 big-endian bytes as a scalar, rejecting values >= n.
/// Zero is allowed here; the individual call sites decide whether zero is
/// meaningful for them.
fn canonical_scalar(bytes: &[u8; 32]) -> Option<Scalar> {
    Scalar::from_repr(*FieldBytes::from_slice(bytes)).into()
}

/// A single signing attempt for a given nonce. Steps 2-5 of the module-level
/// algorithm description.
fn try_sign(
    d: &Scalar,
    q_compressed: &[u8; 33],
    k_bytes: &[u8; 32],
    message: &[u8],
) -> Result<Signature, Reject> {
    let k = canonical_scalar(k_bytes).ok_or(Reject::NonceOutOfRange)?;
    if bool::from(k.is_zero()) {
        return Err(Reject::NonceOutOfRange);
    }

    // Commitment R = k*G, compressed.
    let r_point = ProjectivePoint::GENERATOR * k;
    let r_encoded = r_point.to_affine().to_encoded_point(true);

    // Challenge e = H(R || Q || m) mod n.
    let digest = schnorr_challenge(r_encoded.as_bytes(), q_compressed, message);
    let e = <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(&digest));
    if bool::from(e.is_zero()) {
        return Err(Reject::ZeroChallenge);
    }

    // Response s = k - e*d mod n. The TR-03111 subtraction.
    let s = k - e * d;
    if bool::from(s.is_zero()) {
        return Err(Reject::ZeroResponse);
    }

    Ok(Signature {
        r: e.to_bytes().into(),
        s: s.to_bytes().into(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
