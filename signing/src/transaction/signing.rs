//! # Transaction Signing
//!
//! The glue between the transaction encoder and the signature engine:
//! encode the transaction canonically, sign or verify exactly those bytes,
//! and carry the result in the transaction's `signature` field as hex.

use tracing::debug;

use crate::crypto::{PrivateKey, PublicKey, SchnorrEngine, Signature};

use super::encoder::encode_transaction;
use super::types::{RawTransaction, TransactionError};

/// Sign a transaction in place.
///
/// Encodes the transaction to its canonical bytes, signs them with
/// `private_key`, and stores the 128-character hex signature in
/// `tx.signature`. An existing signature is overwritten — re-signing after
/// a field change is the intended way to fix a stale signature.
///
/// The transaction's `pub_key` field is part of the signed bytes, so it
/// must belong to `private_key`: an empty `pub_key` is filled in from the
/// key, a populated one is cross-checked.
///
/// # Errors
///
/// - [`TransactionError::PublicKeyMismatch`] when `tx.pub_key` names a
///   different key than `private_key` controls.
/// - [`TransactionError::InvalidAddress`] / `InvalidPublicKey` from
///   encoding.
/// - [`TransactionError::Signing`] when the engine's entropy source fails.
pub fn sign_transaction(
    engine: &SchnorrEngine,
    tx: &mut RawTransaction,
    private_key: &PrivateKey,
) -> Result<(), TransactionError> {
    let public_key = private_key.public_key();
    let pub_key_hex = public_key.to_hex();

    if tx.pub_key.is_empty() {
        tx.pub_key = pub_key_hex;
    } else if !tx.pub_key.eq_ignore_ascii_case(&pub_key_hex) {
        return Err(TransactionError::PublicKeyMismatch);
    }

    let message = encode_transaction(tx)?;
    let signature = engine.sign(private_key, &public_key, &message)?;
    tx.signature = Some(signature.to_hex());

    debug!(
        nonce = tx.nonce,
        to = %tx.to_addr,
        bytes = message.len(),
        "transaction signed"
    );
    Ok(())
}

/// Verify a signed transaction.
///
/// Re-encodes the transaction and checks its signature against the public
/// key embedded in the `pub_key` field — the same key the network's nodes
/// will use. Returns `Ok(false)` for a well-formed transaction whose
/// signature simply doesn't verify; errors are reserved for transactions
/// that are malformed (no signature, undecodable fields).
pub fn verify_transaction(
    engine: &SchnorrEngine,
    tx: &RawTransaction,
) -> Result<bool, TransactionError> {
    let signature_hex = tx
        .signature
        .as_deref()
        .ok_or(TransactionError::MissingSignature)?;
    let signature =
        Signature::from_hex(signature_hex).map_err(|_| TransactionError::MalformedSignature)?;
    let public_key = PublicKey::from_hex(&tx.pub_key)?;

    let message = encode_transaction(tx)?;
    Ok(engine.verify(&signature, &public_key, &message))
}
