//! # Protocol Configuration & Constants
//!
//! Every magic number in the Zephyr signing layer lives here. If you're
//! hardcoding a constant somewhere else, you're doing it wrong.
//!
//! Most of these values are compatibility contracts with the network:
//! changing the DRN personalization label or a wire field width produces
//! signatures the network rejects, with no error message to help you.

// ---------------------------------------------------------------------------
// Key & Signature Sizes
// ---------------------------------------------------------------------------

/// Private key length in bytes. A secp256k1 scalar, big-endian.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Compressed public key length: one parity byte (0x02/0x03) + x-coordinate.
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// Uncompressed public key length: 0x04 + x + y.
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// Signature length in bytes: two fixed-width 32-byte scalars, `r || s`.
/// The wire format is the 128-character hex concatenation of both. Fixed
/// width — leading zeros are never stripped.
pub const SIGNATURE_LENGTH: usize = 64;

/// Address length in bytes: the low 20 bytes of SHA-256 of the compressed
/// public key.
pub const ADDRESS_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Deterministic Nonce Derivation
// ---------------------------------------------------------------------------

/// HMAC-DRBG personalization label for nonce derivation.
///
/// Exactly 16 ASCII bytes identifying the scheme and hash in use, padding
/// included. Every conforming client seeds its DRBG with this label; a
/// different label derives different nonces and therefore different (still
/// valid) signatures, but determinism guarantees across clients are lost.
pub const DRN_PERSONALIZATION: &[u8; 16] = b"Schnorr+SHA256  ";

/// Entropy input length for each nonce derivation, in bytes.
pub const DRN_ENTROPY_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Retry Bounds
// ---------------------------------------------------------------------------

/// Maximum signing attempts before giving up.
///
/// Each attempt is rejected only when the derived nonce, the challenge, or
/// the response reduces to zero or falls outside [1, n). For a functioning
/// CSPRNG each rejection has probability ~2^-128 or less, so this cap is
/// unreachable in practice. It exists so a broken entropy source produces
/// an error instead of a hang, and it does not depend on any secret value.
pub const MAX_SIGN_ATTEMPTS: usize = 128;

/// Maximum key generation attempts. Same reasoning as [`MAX_SIGN_ATTEMPTS`]:
/// a fresh 32-byte draw falls outside [1, n) with probability ~2^-128.
pub const MAX_KEYGEN_ATTEMPTS: usize = 128;

// ---------------------------------------------------------------------------
// Canonical Transaction Wire Format
// ---------------------------------------------------------------------------

/// Width of the `amount` and `gas_price` byte-array fields in the canonical
/// encoding: the value as a 16-byte big-endian integer, left-zero-padded.
///
/// This is part of the pinned wire revision. Do not "fix" it to 32 bytes or
/// to the varint encoding used by other numeric fields — mixing widths from
/// different wire revisions is exactly the failure mode the fixture tests
/// exist to catch.
pub const WIRE_NUMERIC_WIDTH: usize = 16;

/// Wire protocol revision implemented by [`crate::transaction::encoder`].
/// Revision 2 is the tagged (length-delimited) encoding; revision 1 was the
/// flat zero-padded concatenation and is not supported.
pub const WIRE_REVISION: u8 = 2;
