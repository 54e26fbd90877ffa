//! # Cryptographic Core
//!
//! Everything with real correctness risk lives in this module: a single
//! sign-time defect here (nonce reuse, wrong modulus, wrong serialization)
//! either leaks the private key or produces signatures the network rejects.
//!
//! We deliberately consume the dangerous primitives from audited crates:
//!
//! - **secp256k1 arithmetic** — the `k256` crate. Scalars, points, SEC1
//!   compression. We never touch field elements directly.
//! - **HMAC-DRBG** — the `hmac-drbg` crate, seeded per NIST SP 800-90A.
//! - **SHA-256** — the `sha2` crate.
//!
//! What we *do* implement is the EC-Schnorr protocol logic on top: the
//! BSI TR-03111 sign/verify equations, deterministic nonce derivation tied
//! to the message, and the exact challenge-hash concatenation the network
//! expects. That logic is small on purpose — small enough to audit against
//! the fixtures in each module's tests.
//!
//! ## A note on "rolling your own crypto"
//!
//! The protocol logic here is "our own" only in the sense that the network
//! demands this exact non-standard variant. Every reduction is mod n (the
//! group order), never mod p; every comparison is over canonical fixed-width
//! encodings. If you're tempted to simplify either of those properties,
//! please read the module tests first and then lose the urge.

pub mod drn;
pub mod hash;
pub mod keys;
pub mod schnorr;

// Re-export the things people actually need so they don't have to memorize
// our module hierarchy.
pub use drn::generate_nonce;
pub use hash::{schnorr_challenge, sha256};
pub use keys::{is_valid_public_key, KeyError, PrivateKey, PublicKey};
pub use schnorr::{SchnorrEngine, SchnorrError, Signature};
