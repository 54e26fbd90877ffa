//! # Transaction Types
//!
//! The [`RawTransaction`] struct and its builder. Field conventions follow
//! the network's JSON-RPC surface: addresses and public keys travel as hex
//! strings, monetary amounts as integers in the chain's smallest unit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{is_valid_public_key, KeyError, SchnorrError};
use crate::identity::is_valid_address;

/// Errors from building, encoding, signing, or verifying transactions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// `to_addr` is not 40 hex characters / 20 bytes.
    #[error("invalid recipient address: expected 40 hex characters")]
    InvalidAddress,

    /// `pub_key` is not a 33-byte compressed-key hex string.
    #[error("invalid sender public key: expected 66 hex characters with 02/03 prefix")]
    InvalidPublicKey,

    /// The transaction's `pub_key` does not belong to the signing key.
    /// Signing anyway would produce a transaction the network rejects,
    /// since verifiers hash the embedded key, not the signer's.
    #[error("transaction public key does not match the signing key")]
    PublicKeyMismatch,

    /// Asked to verify a transaction that carries no signature.
    #[error("transaction is not signed")]
    MissingSignature,

    /// The signature field is present but not a 128-character hex pair.
    #[error("malformed signature: expected 128 hex characters")]
    MalformedSignature,

    /// The signature engine failed (entropy trouble; see [`SchnorrError`]).
    #[error(transparent)]
    Signing(#[from] SchnorrError),

    /// Key material embedded in the transaction failed to parse as a
    /// curve point.
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// A transaction as the client assembles it, before and after signing.
///
/// This is the unit the whole crate revolves around: [`super::encoder`]
/// turns it into canonical bytes, [`super::signing`] signs those bytes and
/// fills in [`signature`](Self::signature).
///
/// Serde names match the RPC wire format (`toAddr`, `pubKey`, ...), so a
/// signed transaction serializes straight into a `CreateTransaction` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    /// Chain/message version. Encodes chain id and transaction format.
    pub version: u32,
    /// Account nonce: count of transactions sent from this address, plus
    /// one. The network executes in nonce order.
    pub nonce: u64,
    /// Recipient address: 40 hex characters, no prefix.
    pub to_addr: String,
    /// Transfer amount in the chain's smallest unit.
    pub amount: u128,
    /// Sender's compressed public key: 66 hex characters.
    pub pub_key: String,
    /// Price per gas unit, smallest unit.
    pub gas_price: u128,
    /// Gas budget for execution.
    pub gas_limit: u64,
    /// Contract code, for deployments. Empty for plain transfers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code: Vec<u8>,
    /// Invocation payload, for contract calls. Empty for plain transfers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
    /// The signature over the canonical encoding, as 128 hex characters.
    /// `None` until [`super::sign_transaction`] runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl RawTransaction {
    /// Start building a transaction. `to_addr` and `pub_key` are the only
    /// fields without a usable default.
    pub fn builder() -> RawTransactionBuilder {
        RawTransactionBuilder::default()
    }
}

/// Builder for [`RawTransaction`].
///
/// Validation happens once, in [`build`](Self::build) — the setters accept
/// anything so call sites stay clean.
///
/// # Examples
///
/// ```
/// use zephyr_signing::transaction::RawTransaction;
///
/// let tx = RawTransaction::builder()
///     .version(1)
///     .nonce(8)
///     .to_addr("fe90767e34bb8e0d33e9b98529fa34f89280b078")
///     .amount(100)
///     .pub_key("03ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946")
///     .gas_price(1)
///     .gas_limit(50)
///     .build()
///     .unwrap();
/// assert!(tx.signature.is_none());
/// ```
#[derive(Debug, Default, Clone)]
pub struct RawTransactionBuilder {
    version: u32,
    nonce: u64,
    to_addr: String,
    amount: u128,
    pub_key: String,
    gas_price: u128,
    gas_limit: u64,
    code: Vec<u8>,
    data: Vec<u8>,
}

impl RawTransactionBuilder {
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn to_addr(mut self, to_addr: impl Into<String>) -> Self {
        self.to_addr = to_addr.into();
        self
    }

    pub fn amount(mut self, amount: u128) -> Self {
        self.amount = amount;
        self
    }

    pub fn pub_key(mut self, pub_key: impl Into<String>) -> Self {
        self.pub_key = pub_key.into();
        self
    }

    pub fn gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn code(mut self, code: impl Into<Vec<u8>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// Validate and produce the transaction.
    ///
    /// # Errors
    ///
    /// [`TransactionError::InvalidAddress`] or
    /// [`TransactionError::InvalidPublicKey`] when the respective field is
    /// not shaped right. Shape checks only; the encoder re-validates when
    /// it actually decodes the hex.
    pub fn build(self) -> Result<RawTransaction, TransactionError> {
        if !is_valid_address(&self.to_addr) {
            return Err(TransactionError::InvalidAddress);
        }
        if !is_valid_public_key(&self.pub_key) {
            return Err(TransactionError::InvalidPublicKey);
        }

        Ok(RawTransaction {
            version: self.version,
            nonce: self.nonce,
            to_addr: self.to_addr,
            amount: self.amount,
            pub_key: self.pub_key,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            code: self.code,
            data: self.data,
            signature: None,
        })
    }
}
