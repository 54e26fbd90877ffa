//! Interactive CLI demo of the Zephyr client-side signing lifecycle.
//!
//! Walks through key generation, address derivation, transaction
//! construction, canonical encoding, EC-Schnorr signing, verification, and
//! a tampering demonstration. The output uses ANSI escape codes for
//! colored, storytelling-style terminal rendering.
//!
//! Run with:
//!   cargo run --example demo --release

use std::time::Instant;

use zephyr_signing::crypto::{PrivateKey, SchnorrEngine, Signature};
use zephyr_signing::identity::Address;
use zephyr_signing::transaction::{
    encode_transaction, sign_transaction, verify_transaction, RawTransaction,
};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[31m";
const WHITE: &str = "\x1b[37m";

const BG_BLUE: &str = "\x1b[44m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn banner() {
    println!();
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}    ZEPHYR SIGNING  --  Client-Side Signing Lifecycle Demo          {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}    EC-Schnorr (secp256k1) + HMAC-DRBG + SHA-256                    {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!();
}

fn section(num: u32, title: &str) {
    println!();
    println!(
        "{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]=============================================================={RESET}"
    );
    println!("{BOLD}{WHITE}  {title}{RESET}");
    println!(
        "{CYAN}------------------------------------------------------------------------{RESET}"
    );
}

fn subsection(text: &str) {
    println!("{DIM}{CYAN}  >> {text}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn failure(text: &str) {
    println!("{RED}  [REJECTED] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}{MAGENTA}  [{label}: {ms:.2} ms]{RESET}");
}

fn truncated(s: &str, len: usize) -> String {
    if s.len() <= len {
        s.to_string()
    } else {
        format!("{}...", &s[..len])
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let demo_start = Instant::now();
    let engine = SchnorrEngine::new();

    banner();

    // -----------------------------------------------------------------------
    // Step 1: Key Generation & Address Derivation
    // -----------------------------------------------------------------------

    section(1, "Key Generation & Address Derivation");
    subsection("Generating secp256k1 key pairs via rejection sampling...");

    let t = Instant::now();
    let alice_sk = PrivateKey::generate().expect("keygen");
    let bob_sk = PrivateKey::generate().expect("keygen");
    timing("keygen x2", t.elapsed());

    let alice_pk = alice_sk.public_key();
    let alice_addr = Address::from_public_key(&alice_pk);
    let bob_addr = Address::from_private_key(&bob_sk);

    println!();
    println!(
        "  {BLUE}{BOLD}Alice{RESET}  pub={DIM}{}{RESET}  addr={YELLOW}{}{RESET}",
        truncated(&alice_pk.to_hex(), 18),
        alice_addr
    );
    println!(
        "  {GREEN}{BOLD}Bob{RESET}    pub={DIM}{}{RESET}  addr={YELLOW}{}{RESET}",
        truncated(&bob_sk.public_key().to_hex(), 18),
        bob_addr
    );
    println!();
    success("Addresses derived: last 20 bytes of SHA-256 over the compressed key");

    // -----------------------------------------------------------------------
    // Step 2: Transaction Construction
    // -----------------------------------------------------------------------

    section(2, "Transaction Construction");
    subsection("Building a transfer of 1,000,000,000,000 motes, Alice -> Bob...");

    let mut tx = RawTransaction::builder()
        .version(1)
        .nonce(1)
        .to_addr(bob_addr.to_string())
        .amount(1_000_000_000_000)
        .pub_key(alice_pk.to_hex())
        .gas_price(1_000_000_000)
        .gas_limit(1)
        .build()
        .expect("valid transfer");

    info("Recipient", &tx.to_addr);
    info("Amount", &tx.amount.to_string());
    info("Nonce", &tx.nonce.to_string());
    success("Transaction validated and assembled (unsigned)");

    // -----------------------------------------------------------------------
    // Step 3: Canonical Encoding
    // -----------------------------------------------------------------------

    section(3, "Canonical Wire Encoding");
    subsection("Reducing the transaction to the byte string the network signs...");

    let t = Instant::now();
    let encoded = encode_transaction(&tx).expect("encodable");
    timing("encode", t.elapsed());

    info("Encoded length", &format!("{} bytes", encoded.len()));
    info("First bytes", &truncated(&hex::encode(&encoded), 48));
    success("Deterministic encoding: same fields, same bytes, on every client");

    // -----------------------------------------------------------------------
    // Step 4: Signing
    // -----------------------------------------------------------------------

    section(4, "EC-Schnorr Signing");
    subsection("Deriving a nonce through HMAC-DRBG and signing the canonical bytes...");

    let t = Instant::now();
    sign_transaction(&engine, &mut tx, &alice_sk).expect("signing");
    timing("sign", t.elapsed());

    let sig_hex = tx.signature.clone().expect("signature present");
    info("Signature (r||s)", &truncated(&sig_hex, 48));
    info("Signature length", &format!("{} hex chars", sig_hex.len()));
    success("Signature attached; s = k - e*d mod n, per the network's scheme");

    // -----------------------------------------------------------------------
    // Step 5: Verification
    // -----------------------------------------------------------------------

    section(5, "Verification");
    subsection("Reconstructing the commitment R' = s*G + r*Q and recomputing e...");

    let t = Instant::now();
    let valid = verify_transaction(&engine, &tx).expect("well-formed");
    timing("verify", t.elapsed());

    assert!(valid);
    success("Signature verifies against the embedded public key");

    // Standalone verification over the raw bytes agrees.
    let sig = Signature::from_hex(&sig_hex).expect("parseable");
    assert!(engine.verify(&sig, &alice_pk, &encoded));
    success("Raw-byte verification agrees with the transaction-level check");

    // -----------------------------------------------------------------------
    // Step 6: Tampering Demonstration
    // -----------------------------------------------------------------------

    section(6, "Tampering Demonstration");
    subsection("Mutating signed fields and re-verifying...");

    let mut doubled = tx.clone();
    doubled.amount *= 2;
    if !verify_transaction(&engine, &doubled).expect("well-formed") {
        failure("amount doubled -> signature no longer verifies");
    }

    let mut redirected = tx.clone();
    redirected.to_addr = alice_addr.to_string();
    if !verify_transaction(&engine, &redirected).expect("well-formed") {
        failure("recipient redirected -> signature no longer verifies");
    }

    success("Every signed byte is load-bearing");

    // -----------------------------------------------------------------------
    // Final Summary
    // -----------------------------------------------------------------------

    let total_elapsed = demo_start.elapsed();

    println!();
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}    DEMO COMPLETE -- Final Summary                                  {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!();

    println!("  {BOLD}{WHITE}Signing Layer Statistics:{RESET}");
    println!("  {DIM}----------------------------------------------{RESET}");
    info("Curve", "secp256k1 (k256 0.13)");
    info("Scheme", "EC-Schnorr, BSI TR-03111 variant");
    info("Nonce derivation", "HMAC-DRBG (SHA-256), message-bound");
    info("Hash function", "SHA-256 (challenge, addresses)");
    info("Address format", "40 hex chars, sha256(pubkey)[12..]");
    info("Wire format", "tagged canonical encoding, revision 2");
    println!();
    println!(
        "  {BOLD}{GREEN}Total demo time: {:.2}s{RESET}",
        total_elapsed.as_secs_f64()
    );
    println!();
}
