//! # Canonical Transaction Encoding
//!
//! Turns a [`RawTransaction`] into the exact byte string the network signs
//! and verifies. This is wire revision 2 (see
//! [`crate::config::WIRE_REVISION`]): a tagged, protobuf-compatible
//! encoding of the transaction core fields.
//!
//! ## Field layout
//!
//! | # | field        | wire form                                        |
//! |---|--------------|--------------------------------------------------|
//! | 1 | version      | varint                                           |
//! | 2 | nonce        | varint                                           |
//! | 3 | to_addr      | 20 raw bytes, length-delimited                   |
//! | 4 | pub_key      | nested byte-array message, 33-byte payload       |
//! | 5 | amount       | nested byte-array message, 16-byte big-endian    |
//! | 6 | gas_price    | nested byte-array message, 16-byte big-endian    |
//! | 7 | gas_limit    | varint                                           |
//! | 8 | code         | length-delimited bytes, omitted when empty       |
//! | 9 | data         | length-delimited bytes, omitted when empty       |
//!
//! Rules that bite if you get them wrong:
//!
//! - Fields appear in ascending field order, always.
//! - `version`, `nonce`, and `gas_limit` are emitted even when zero. They
//!   carry explicit presence on the wire; "zero" and "absent" are different
//!   transactions.
//! - `amount` and `gas_price` are **not** varints. They are 16-byte
//!   big-endian integers, left-zero-padded to full width, wrapped in a
//!   nested message. An amount of 100 occupies 16 bytes on the wire.
//! - `code` and `data` are omitted entirely when empty. A present
//!   zero-length field is a different byte string and therefore a
//!   different signature.
//!
//! Every rule above is pinned by a byte-exact fixture in the tests. If you
//! change this module and a fixture fails, the fixture is right.

use crate::config::{ADDRESS_LENGTH, COMPRESSED_PUBLIC_KEY_LENGTH, WIRE_NUMERIC_WIDTH};

use super::types::{RawTransaction, TransactionError};

// Wire types, per the protobuf encoding: 0 = varint, 2 = length-delimited.
const WIRE_VARINT: u8 = 0;
const WIRE_LEN: u8 = 2;

/// Encode a transaction into its canonical signing bytes.
///
/// Deterministic: equal field values produce identical bytes, on every
/// client, every time. The output is what [`super::sign_transaction`]
/// signs and what the network's verifiers reconstruct.
///
/// # Errors
///
/// [`TransactionError::InvalidAddress`] / [`TransactionError::InvalidPublicKey`]
/// when `to_addr` or `pub_key` don't decode to 20 and 33 bytes
/// respectively. The signature field is ignored — signing bytes never
/// include the signature.
pub fn encode_transaction(tx: &RawTransaction) -> Result<Vec<u8>, TransactionError> {
    let to_addr = hex::decode(&tx.to_addr).map_err(|_| TransactionError::InvalidAddress)?;
    if to_addr.len() != ADDRESS_LENGTH {
        return Err(TransactionError::InvalidAddress);
    }
    let pub_key = hex::decode(&tx.pub_key).map_err(|_| TransactionError::InvalidPublicKey)?;
    if pub_key.len() != COMPRESSED_PUBLIC_KEY_LENGTH {
        return Err(TransactionError::InvalidPublicKey);
    }

    let mut out = Vec::with_capacity(128 + tx.code.len() + tx.data.len());

    put_varint_field(&mut out, 1, u64::from(tx.version));
    put_varint_field(&mut out, 2, tx.nonce);
    put_bytes_field(&mut out, 3, &to_addr);
    put_byte_array_field(&mut out, 4, &pub_key);
    put_numeric_field(&mut out, 5, tx.amount);
    put_numeric_field(&mut out, 6, tx.gas_price);
    put_varint_field(&mut out, 7, tx.gas_limit);
    if !tx.code.is_empty() {
        put_bytes_field(&mut out, 8, &tx.code);
    }
    if !tx.data.is_empty() {
        put_bytes_field(&mut out, 9, &tx.data);
    }

    Ok(out)
}

/// A field key: field number shifted past the 3-bit wire type.
fn put_key(out: &mut Vec<u8>, field: u32, wire_type: u8) {
    put_varint(out, u64::from(field << 3 | u32::from(wire_type)));
}

/// Base-128 varint, least-significant group first.
fn put_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

fn put_varint_field(out: &mut Vec<u8>, field: u32, value: u64) {
    put_key(out, field, WIRE_VARINT);
    put_varint(out, value);
}

fn put_bytes_field(out: &mut Vec<u8>, field: u32, payload: &[u8]) {
    put_key(out, field, WIRE_LEN);
    put_varint(out, payload.len() as u64);
    out.extend_from_slice(payload);
}

/// A nested byte-array message: a single length-delimited inner field
/// (number 1) holding the payload.
fn put_byte_array_field(out: &mut Vec<u8>, field: u32, payload: &[u8]) {
    let mut inner = Vec::with_capacity(2 + payload.len());
    put_bytes_field(&mut inner, 1, payload);
    put_bytes_field(out, field, &inner);
}

/// A numeric byte-array field: the value as a 16-byte big-endian integer,
/// left-zero-padded, inside a nested byte-array message.
fn put_numeric_field(out: &mut Vec<u8>, field: u32, value: u128) {
    let be = value.to_be_bytes();
    debug_assert_eq!(be.len(), WIRE_NUMERIC_WIDTH);
    put_byte_array_field(out, field, &be);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_fixture_contract_deployment() {
        // Byte-exact network fixture: every field populated, including code
        // and data. Pins the tag bytes, the nested pub_key wrapper, the
        // 16-byte numeric padding, and the multi-byte gas_limit varint.
        let tx = RawTransaction::builder()
            .version(10)
            .nonce(16)
            .to_addr("fe90767e34bb8e0d33e9b98529fa34f89280b078")
            .amount(100)
            .pub_key("03ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946")
            .gas_price(88)
            .gas_limit(888)
            .code("aiueo")
            .data("abcde")
            .build()
            .unwrap();

        let encoded = encode_transaction(&tx).unwrap();
        assert_eq!(
            hex::encode(encoded),
            "080a10101a14fe90767e34bb8e0d33e9b98529fa34f89280b07822230a2103ad5893983179a55c46\
             6d94995de934140ef3cb610526aedfac214db7ec8e09462a120a1000000000000000000000000000\
             00006432120a100000000000000000000000000000005838f8064205616975656f4a056162636465"
        );
    }

    #[test]
    fn encoder_fixture_plain_transfer() {
        // Byte-exact fixture for a transfer with no code/data: the trailing
        // fields must be absent, not present-and-empty.
        let tx = RawTransaction::builder()
            .version(21823489)
            .nonce(1)
            .to_addr("df4b175c78e16eebc05173e5c1f87355622d8104")
            .amount(1_000_000_000_000)
            .pub_key("02892a6380826988cc46f317310d09f3bab838b9d8c2407775f20f6ab8bd2a9fff")
            .gas_price(1_000_000_000)
            .gas_limit(1)
            .build()
            .unwrap();

        let encoded = encode_transaction(&tx).unwrap();
        assert_eq!(
            hex::encode(encoded),
            "088180b40a10011a14df4b175c78e16eebc05173e5c1f87355622d810422230a2102892a63808269\
             88cc46f317310d09f3bab838b9d8c2407775f20f6ab8bd2a9fff2a120a1000000000000000000000\
             00e8d4a5100032120a100000000000000000000000003b9aca003801"
        );
    }

    #[test]
    fn zero_valued_scalars_are_still_emitted() {
        // version/nonce/gas_limit carry presence: zero is on the wire.
        let tx = RawTransaction::builder()
            .to_addr("fe90767e34bb8e0d33e9b98529fa34f89280b078")
            .pub_key("03ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946")
            .build()
            .unwrap();

        let encoded = encode_transaction(&tx).unwrap();
        let hex_str = hex::encode(&encoded);
        assert!(hex_str.starts_with("08001000"), "zero version/nonce dropped");
        assert!(hex_str.contains("3800"), "zero gas_limit dropped");
    }

    #[test]
    fn amounts_are_fixed_width_big_endian() {
        let small = RawTransaction::builder()
            .to_addr("fe90767e34bb8e0d33e9b98529fa34f89280b078")
            .pub_key("03ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946")
            .amount(1)
            .build()
            .unwrap();
        let large = RawTransaction { amount: u128::MAX, ..small.clone() };

        // Same overall length whatever the magnitude: the numeric fields
        // never shrink or grow.
        let encoded_small = encode_transaction(&small).unwrap();
        let encoded_large = encode_transaction(&large).unwrap();
        assert_eq!(encoded_small.len(), encoded_large.len());

        let hex_small = hex::encode(&encoded_small);
        assert!(hex_small.contains("2a120a1000000000000000000000000000000001"));
        let hex_large = hex::encode(&encoded_large);
        assert!(hex_large.contains("2a120a10ffffffffffffffffffffffffffffffff"));
    }

    #[test]
    fn encoding_is_deterministic() {
        let tx = RawTransaction::builder()
            .version(3)
            .nonce(77)
            .to_addr("fe90767e34bb8e0d33e9b98529fa34f89280b078")
            .amount(5)
            .pub_key("03ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946")
            .gas_price(2)
            .gas_limit(10)
            .data("payload")
            .build()
            .unwrap();

        assert_eq!(encode_transaction(&tx).unwrap(), encode_transaction(&tx).unwrap());
    }

    #[test]
    fn signature_field_never_reaches_the_wire() {
        let unsigned = RawTransaction::builder()
            .to_addr("fe90767e34bb8e0d33e9b98529fa34f89280b078")
            .pub_key("03ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946")
            .build()
            .unwrap();
        let mut signed = unsigned.clone();
        signed.signature = Some("00".repeat(64));

        assert_eq!(
            encode_transaction(&unsigned).unwrap(),
            encode_transaction(&signed).unwrap()
        );
    }

    #[test]
    fn malformed_fields_rejected() {
        let good = RawTransaction::builder()
            .to_addr("fe90767e34bb8e0d33e9b98529fa34f89280b078")
            .pub_key("03ad5893983179a55c466d94995de934140ef3cb610526aedfac214db7ec8e0946")
            .build()
            .unwrap();

        let mut bad_addr = good.clone();
        bad_addr.to_addr = "fe90".into();
        assert_eq!(
            encode_transaction(&bad_addr),
            Err(TransactionError::InvalidAddress)
        );

        let mut bad_key = good;
        bad_key.pub_key = "03ad58".into();
        assert_eq!(
            encode_transaction(&bad_key),
            Err(TransactionError::InvalidPublicKey)
        );
    }

    #[test]
    fn varint_boundaries() {
        let mut buf = Vec::new();
        put_varint(&mut buf, 0);
        assert_eq!(buf, [0x00]);

        buf.clear();
        put_varint(&mut buf, 127);
        assert_eq!(buf, [0x7f]);

        buf.clear();
        put_varint(&mut buf, 128);
        assert_eq!(buf, [0x80, 0x01]);

        buf.clear();
        put_varint(&mut buf, 888);
        assert_eq!(buf, [0xf8, 0x06]);

        buf.clear();
        put_varint(&mut buf, u64::MAX);
        assert_eq!(buf.len(), 10);
    }
}
