//! # Transactions
//!
//! The client-side transaction pipeline: describe a payment or contract
//! call ([`RawTransaction`]), reduce it to the network's canonical byte
//! encoding ([`encoder`]), and sign or verify those exact bytes
//! ([`signing`]).
//!
//! The invariant tying the three together: **the signed message is the
//! canonical encoding, nothing else**. Not JSON, not a hash of the
//! encoding, not a re-serialization — the byte string every node in the
//! network derives from the same fields. Get one byte wrong and the
//! signature is garbage from the network's point of view.

pub mod encoder;
pub mod signing;
pub mod types;

pub use encoder::encode_transaction;
pub use signing::{sign_transaction, verify_transaction};
pub use types::{RawTransaction, RawTransactionBuilder, TransactionError};
