//! # Key Management
//!
//! secp256k1 key material for Zephyr: private scalars and public points,
//! with the validation and encoding rules the network expects.
//!
//! ## Why rejection sampling for key generation?
//!
//! A private key is a scalar in `[1, n-1]` where `n` is the curve group
//! order. The tempting shortcut — draw 32 random bytes and reduce mod n —
//! introduces a (tiny) bias toward small scalars because 2^256 is not a
//! multiple of n. We instead draw and re-draw until the bytes already
//! represent a valid scalar. Since n is within a hair of 2^256, the loop
//! body almost never runs twice; the retry cap exists purely to turn a
//! broken RNG into an error.
//!
//! ## Security considerations
//!
//! - The private scalar lives in a `k256::SecretKey`, which zeroizes its
//!   memory on drop.
//! - Key bytes are never logged. If you add logging to this module,
//!   you will be asked to leave.
//! - `Debug` output is redacted to the derived public key.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{FieldBytes, ProjectivePoint, Scalar, SecretKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use thiserror::Error;

use crate::config::{
    COMPRESSED_PUBLIC_KEY_LENGTH, MAX_KEYGEN_ATTEMPTS, PRIVATE_KEY_LENGTH,
    UNCOMPRESSED_PUBLIC_KEY_LENGTH,
};

/// Errors that can occur during key operations.
///
/// Intentionally vague about *why* key material was rejected — leaking
/// detail about secrets through error messages is a classic footgun.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The scalar is zero or not below the group order. Private keys must
    /// satisfy `1 <= d < n`; out-of-range values are rejected here, at
    /// validation time, never silently reduced.
    #[error("invalid scalar: must be in [1, n-1]")]
    InvalidScalar,

    /// The bytes are not a valid SEC1 point encoding (bad prefix, wrong
    /// length, or x/y not on the curve).
    #[error("malformed public key encoding")]
    MalformedKeyEncoding,

    /// Hex decoding failed or the decoded length is wrong. A caller error;
    /// retrying with the same input cannot succeed.
    #[error("decoding failure: bad hex or wrong byte length")]
    DecodingFailure,

    /// The rejection-sampling loop hit its cap without producing a valid
    /// scalar. With a functioning RNG this has probability ~2^-16384;
    /// seeing it means the entropy source is returning garbage.
    #[error("key generation retries exhausted; randomness source looks broken")]
    RetriesExhausted,
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A secp256k1 private key: a scalar `d` with `1 <= d < n`.
///
/// The engine never persists this; ownership stays with the caller.
/// Construction validates the range once — signing does not re-validate.
///
/// # Examples
///
/// ```
/// use zephyr_signing::crypto::PrivateKey;
///
/// let sk = PrivateKey::generate().unwrap();
/// let pk = sk.public_key();
/// assert_eq!(pk.to_compressed().len(), 33);
/// ```
pub struct PrivateKey {
    secret: SecretKey,
}

impl PrivateKey {
    /// Generate a fresh private key from the OS cryptographic RNG.
    ///
    /// Rejection-samples 32-byte draws until one lands in `[1, n-1]`.
    /// Never reduces mod n.
    pub fn generate() -> Result<Self, KeyError> {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generate a private key using the provided RNG.
    ///
    /// Exposed so tests and callers with their own entropy policy can
    /// inject an RNG; production code should prefer [`generate`](Self::generate).
    pub fn generate_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, KeyError> {
        let mut candidate = [0u8; PRIVATE_KEY_LENGTH];
        for _ in 0..MAX_KEYGEN_ATTEMPTS {
            rng.fill_bytes(&mut candidate);
            // from_bytes rejects 0 and anything >= n. On rejection we draw
            // fresh bytes rather than massaging the failed ones.
            if let Ok(secret) = SecretKey::from_bytes(FieldBytes::from_slice(&candidate)) {
                return Ok(Self { secret });
            }
        }
        Err(KeyError::RetriesExhausted)
    }

    /// Reconstruct a private key from 32 big-endian bytes.
    ///
    /// # Errors
    ///
    /// [`KeyError::InvalidScalar`] for zero or `>= n`. No reduction, no
    /// clamping — an out-of-range key is a caller bug, not an input format.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LENGTH]) -> Result<Self, KeyError> {
        let secret = SecretKey::from_bytes(FieldBytes::from_slice(bytes))
            .map_err(|_| KeyError::InvalidScalar)?;
        Ok(Self { secret })
    }

    /// Reconstruct a private key from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::DecodingFailure)?;
        let arr: [u8; PRIVATE_KEY_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::DecodingFailure)?;
        Self::from_bytes(&arr)
    }

    /// Derive the public key `Q = d*G`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.secret.public_key(),
        }
    }

    /// Export the raw 32-byte big-endian scalar.
    ///
    /// **Handle with extreme care.** This is the only secret standing
    /// between an attacker and the associated funds.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.secret.to_bytes().into()
    }

    /// Export the key as lowercase hex. Same warnings as [`to_bytes`](Self::to_bytes).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The scalar value, for the signing equation.
    pub(crate) fn as_scalar(&self) -> Scalar {
        *self.secret.to_nonzero_scalar().as_ref()
    }
}

impl Clone for PrivateKey {
    /// Cloning a private key is allowed but should make you uncomfortable.
    /// Every copy is another thing to protect.
    fn clone(&self) -> Self {
        Self {
            secret: self.secret.clone(),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material, not even "partially". A partial leak
        // is still a leak, and grepping logs for hex is trivial.
        write!(f, "PrivateKey(pub={})", self.public_key().to_hex())
    }
}

impl PartialEq for PrivateKey {
    /// Compared via public keys: comparing secret material in a
    /// non-constant-time way is a bad habit.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for PrivateKey {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A secp256k1 public key: the curve point `Q = d*G`.
///
/// Always a valid, non-identity point — the constructors reject anything
/// else. Serializable as 33-byte compressed (parity byte + x) or 65-byte
/// uncompressed (0x04 + x + y) SEC1 encodings; the network's challenge hash
/// and address derivation both use the compressed form.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Parse a SEC1-encoded point (compressed or uncompressed).
    ///
    /// # Errors
    ///
    /// [`KeyError::MalformedKeyEncoding`] if the bytes are not a valid
    /// point encoding. No retry is safe — the input itself is invalid.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != COMPRESSED_PUBLIC_KEY_LENGTH
            && bytes.len() != UNCOMPRESSED_PUBLIC_KEY_LENGTH
        {
            return Err(KeyError::MalformedKeyEncoding);
        }
        let inner =
            k256::PublicKey::from_sec1_bytes(bytes).map_err(|_| KeyError::MalformedKeyEncoding)?;
        Ok(Self { inner })
    }

    /// Parse a hex-encoded public key (66 or 130 characters).
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::DecodingFailure)?;
        Self::from_sec1_bytes(&bytes)
    }

    /// The 33-byte compressed SEC1 encoding: parity byte + x-coordinate.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        self.inner
            .to_encoded_point(true)
            .as_bytes()
            .try_into()
            .expect("compressed SEC1 encoding of a valid point is always 33 bytes")
    }

    /// The 65-byte uncompressed SEC1 encoding: 0x04 + x + y.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH] {
        self.inner
            .to_encoded_point(false)
            .as_bytes()
            .try_into()
            .expect("uncompressed SEC1 encoding of a valid point is always 65 bytes")
    }

    /// Lowercase hex of the compressed encoding — the form embedded in
    /// transactions and handed to the RPC layer.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// The point in projective coordinates, for the verification equation.
    pub(crate) fn to_point(&self) -> ProjectivePoint {
        ProjectivePoint::from(*self.inner.as_affine())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// Format validation helpers
// ---------------------------------------------------------------------------

/// Check whether a string has the shape of a compressed public key:
/// 66 hex characters with an 02/03 parity prefix.
///
/// Shape only — this does not prove the x-coordinate is on the curve.
/// Use [`PublicKey::from_hex`] when you need the real thing.
pub fn is_valid_public_key(s: &str) -> bool {
    s.len() == 2 * COMPRESSED_PUBLIC_KEY_LENGTH
        && s.chars().all(|c| c.is_ascii_hexdigit())
        && (s.starts_with("02") || s.starts_with("03"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generate_produces_valid_keypair() {
        let sk = PrivateKey::generate().unwrap();
        assert_eq!(sk.to_bytes().len(), 32);
        assert_eq!(sk.public_key().to_compressed().len(), 33);
        assert_eq!(sk.public_key().to_uncompressed().len(), 65);
    }

    #[test]
    fn generated_keys_are_always_in_range() {
        // Never 0, never >= n, over many trials. Range
        // validity is enforced by construction (from_bytes rejects
        // out-of-range scalars), so surviving generation *is* the check.
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..10_000 {
            let sk = PrivateKey::generate_with_rng(&mut rng).unwrap();
            let bytes = sk.to_bytes();
            assert!(bytes.iter().any(|&b| b != 0), "zero scalar escaped");
            // Round-tripping through the validating constructor must succeed.
            assert!(PrivateKey::from_bytes(&bytes).is_ok());
        }
    }

    #[test]
    fn zero_private_key_rejected() {
        assert_eq!(
            PrivateKey::from_bytes(&[0u8; 32]),
            Err(KeyError::InvalidScalar)
        );
    }

    #[test]
    fn order_and_above_rejected() {
        // n itself, n+something, and the all-ones value must all fail.
        let order: [u8; 32] =
            hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
                .unwrap()
                .try_into()
                .unwrap();
        assert_eq!(PrivateKey::from_bytes(&order), Err(KeyError::InvalidScalar));
        assert_eq!(
            PrivateKey::from_bytes(&[0xFFu8; 32]),
            Err(KeyError::InvalidScalar)
        );
    }

    #[test]
    fn order_minus_one_accepted() {
        // n-1 is the largest valid private key.
        let n_minus_1: [u8; 32] =
            hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140")
                .unwrap()
                .try_into()
                .unwrap();
        assert!(PrivateKey::from_bytes(&n_minus_1).is_ok());
    }

    #[test]
    fn private_key_hex_roundtrip() {
        let sk = PrivateKey::generate().unwrap();
        let restored = PrivateKey::from_hex(&sk.to_hex()).unwrap();
        assert_eq!(sk.to_bytes(), restored.to_bytes());
    }

    #[test]
    fn invalid_hex_rejected() {
        assert_eq!(
            PrivateKey::from_hex("deadbeef"),
            Err(KeyError::DecodingFailure)
        );
        assert_eq!(
            PrivateKey::from_hex("not-hex-at-all"),
            Err(KeyError::DecodingFailure)
        );
    }

    #[test]
    fn known_public_key_derivation() {
        // Pinned vector from the network's reference test corpus.
        let sk =
            PrivateKey::from_hex("b7139607427e6a03436469806fc1167ecea26130736bde063a4eed01036dbf03")
                .unwrap();
        assert_eq!(
            sk.public_key().to_hex(),
            "02892a6380826988cc46f317310d09f3bab838b9d8c2407775f20f6ab8bd2a9fff"
        );
    }

    #[test]
    fn public_key_hex_roundtrip_compressed_and_uncompressed() {
        let sk = PrivateKey::generate().unwrap();
        let pk = sk.public_key();

        let from_compressed = PublicKey::from_sec1_bytes(&pk.to_compressed()).unwrap();
        let from_uncompressed = PublicKey::from_sec1_bytes(&pk.to_uncompressed()).unwrap();
        assert_eq!(pk, from_compressed);
        assert_eq!(pk, from_uncompressed);
    }

    #[test]
    fn malformed_public_key_rejected() {
        // Wrong length.
        assert_eq!(
            PublicKey::from_sec1_bytes(&[0x02u8; 20]),
            Err(KeyError::MalformedKeyEncoding)
        );
        // Right length, x not on the curve for this parity/value.
        let mut junk = [0xFFu8; 33];
        junk[0] = 0x02;
        assert_eq!(
            PublicKey::from_sec1_bytes(&junk),
            Err(KeyError::MalformedKeyEncoding)
        );
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let sk = PrivateKey::generate().unwrap();
        let debug_str = format!("{:?}", sk);
        assert!(debug_str.starts_with("PrivateKey(pub="));
        assert!(!debug_str.contains(&sk.to_hex()));
    }

    #[test]
    fn two_generated_keys_differ() {
        // If this fails, your RNG is broken and you should panic (the
        // emotion, not the macro).
        let a = PrivateKey::generate().unwrap();
        let b = PrivateKey::generate().unwrap();
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn public_key_shape_validation() {
        assert!(is_valid_public_key(
            "03ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946"
        ));
        assert!(is_valid_public_key(
            "02892A6380826988CC46F317310D09F3BAB838B9D8C2407775F20F6AB8BD2A9FFF"
        ));
        assert!(!is_valid_public_key("invalid public key"));
        assert!(!is_valid_public_key("04ab")); // wrong length
        assert!(!is_valid_public_key(
            // right length, wrong prefix
            "04ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946"
        ));
    }
}
