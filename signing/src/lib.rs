// Copyright (c) 2026 Zephyr Labs. MIT License.
// See LICENSE for details.

//! # Zephyr Signing — Client-Side Signing Layer
//!
//! This crate is everything a Zephyr client needs to put a valid signature
//! on a transaction, and nothing it doesn't: key pairs, EC-Schnorr signing
//! and verification over secp256k1, deterministic nonce derivation, the
//! canonical transaction byte encoding, and address derivation.
//!
//! Zephyr uses the BSI TR-03111 flavor of EC-Schnorr (`s = k - e*d mod n`),
//! not the textbook `s = k + e*d` — the verification equation accounts for
//! it. Get any byte of this wrong and the network silently rejects your
//! transaction, which is why the wire encoding and the challenge hash are
//! pinned with literal byte fixtures in the tests.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of a
//! signing client:
//!
//! - **crypto** — The algorithmic core: keys, nonces, challenge hash, and
//!   the Schnorr engine itself. This is where the correctness risk lives.
//! - **identity** — Address derivation from public keys. Thin, but it shares
//!   invariants with key validity, so it lives here and not in callers.
//! - **transaction** — The canonical wire encoding and the sign/verify glue.
//! - **config** — Protocol constants. All of them. In one place.
//!
//! ## What this crate is not
//!
//! No RPC transport, no retry logic, no key storage, no unit conversion.
//! Those are separate concerns with separate failure modes; this crate is
//! pure computation plus a CSPRNG.
//!
//! ## Design Philosophy
//!
//! 1. The curve and the DRBG are consumed from audited crates, never
//!    reimplemented.
//! 2. No hidden globals — the engine is an explicit value you construct.
//! 3. Every retry loop is bounded, and the bound is unreachable unless your
//!    RNG is broken.
//! 4. If it touches the wire format, it has a byte-exact fixture test.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod transaction;
