//! # On-Chain Identity
//!
//! How a key becomes a name on the Zephyr network. An account is identified
//! by a 20-byte address derived from its public key; this module owns that
//! derivation and the address formatting rules.

pub mod address;

pub use address::{is_valid_address, Address, AddressError};
