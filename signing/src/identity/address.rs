//! # Address Derivation
//!
//! A Zephyr address is the last 20 bytes of the SHA-256 hash of the
//! **compressed** public key:
//!
//! ```text
//! address = SHA-256(Q_compressed)[12..32]
//! ```
//!
//! Two rules matter for interoperability and both are enforced here:
//!
//! - The hash input is always the 33-byte compressed encoding. Hashing the
//!   uncompressed form yields a different (wrong) address for the same key.
//! - The canonical text form is bare lowercase hex, 40 characters, no `0x`
//!   prefix. Parsing is lenient about case and an optional prefix; output
//!   never is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::ADDRESS_LENGTH;
use crate::crypto::{sha256, PrivateKey, PublicKey};

/// Errors from parsing address text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Not valid hex, or not exactly 20 bytes once decoded.
    #[error("malformed address: expected 40 hex characters")]
    Malformed,
}

/// A 20-byte account address.
///
/// # Examples
///
/// ```
/// use zephyr_signing::crypto::PublicKey;
/// use zephyr_signing::identity::Address;
///
/// let pk = PublicKey::from_hex(
///     "03ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946",
/// )
/// .unwrap();
/// let addr = Address::from_public_key(&pk);
/// assert_eq!(addr.to_string(), "88bb4def5d6989706b2f72858d6e5cbcd0331b93");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Derive the address for a public key.
    ///
    /// Infallible: every valid public key has an address.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let digest = sha256(&public_key.to_compressed());
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest[32 - ADDRESS_LENGTH..]);
        Self(bytes)
    }

    /// Derive the address for the key pair a private key controls.
    pub fn from_private_key(private_key: &PrivateKey) -> Self {
        Self::from_public_key(&private_key.public_key())
    }

    /// Parse an address from hex text. Accepts upper or lower case and an
    /// optional `0x` prefix; the canonical output form remains bare
    /// lowercase.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let stripped = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| AddressError::Malformed)?;
        let arr: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|_| AddressError::Malformed)?;
        Ok(Self(arr))
    }

    /// The raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Construct from raw bytes. For callers that already hold a decoded
    /// address, e.g. out of a transaction's `to_addr` field.
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    /// The canonical text form: 40 lowercase hex characters, no prefix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Check whether a string has the shape of an address: exactly 40 hex
/// characters (case-insensitive, no prefix).
///
/// Shape only. Any 20 bytes form a syntactically valid address; there is no
/// checksum in the canonical format.
pub fn is_valid_address(s: &str) -> bool {
    s.len() == 2 * ADDRESS_LENGTH && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_address_vector() {
        // Pinned derivation: compressed key -> sha256 -> last 20 bytes.
        let pk = PublicKey::from_hex(
            "03ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946",
        )
        .unwrap();
        let addr = Address::from_public_key(&pk);
        assert_eq!(addr.to_string(), "88bb4def5d6989706b2f72858d6e5cbcd0331b93");
    }

    #[test]
    fn private_and_public_derivation_agree() {
        let sk = PrivateKey::generate().unwrap();
        assert_eq!(
            Address::from_private_key(&sk),
            Address::from_public_key(&sk.public_key())
        );
    }

    #[test]
    fn display_is_lowercase_without_prefix() {
        let sk = PrivateKey::generate().unwrap();
        let text = Address::from_private_key(&sk).to_string();
        assert_eq!(text.len(), 40);
        assert!(!text.starts_with("0x"));
        assert_eq!(text, text.to_lowercase());
    }

    #[test]
    fn parsing_is_lenient_output_is_canonical() {
        let addr = Address::from_hex("0x88BB4DEF5D6989706B2F72858D6E5CBCD0331B93").unwrap();
        assert_eq!(addr.to_string(), "88bb4def5d6989706b2f72858d6e5cbcd0331b93");

        let bare: Address = "88bb4def5d6989706b2f72858d6e5cbcd0331b93".parse().unwrap();
        assert_eq!(addr, bare);
    }

    #[test]
    fn malformed_addresses_rejected() {
        assert_eq!(Address::from_hex("abc"), Err(AddressError::Malformed));
        assert_eq!(
            Address::from_hex("zzbb4def5d6989706b2f72858d6e5cbcd0331b93"),
            Err(AddressError::Malformed)
        );
        // 21 bytes.
        assert_eq!(
            Address::from_hex("88bb4def5d6989706b2f72858d6e5cbcd0331b93ff"),
            Err(AddressError::Malformed)
        );
    }

    #[test]
    fn distinct_keys_distinct_addresses() {
        let a = Address::from_private_key(&PrivateKey::generate().unwrap());
        let b = Address::from_private_key(&PrivateKey::generate().unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn shape_validation() {
        assert!(is_valid_address("88bb4def5d6989706b2f72858d6e5cbcd0331b93"));
        assert!(is_valid_address("FE90767E34BB8E0D33E9B98529FA34F89280B078"));
        assert!(!is_valid_address("0x88bb4def5d6989706b2f72858d6e5cbcd0331b93"));
        assert!(!is_valid_address("too short"));
    }

    #[test]
    fn address_serde_roundtrip() {
        let sk = PrivateKey::generate().unwrap();
        let addr = Address::from_private_key(&sk);
        let json = serde_json::to_string(&addr).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }
}
