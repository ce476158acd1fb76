//! Base58 and Base58Check encoding.
//!
//! The alphabet drops `0`, `O`, `I` and `l`, the characters that are easy
//! to confuse in print. Leading zero bytes are preserved as leading `1`
//! characters, since the numeric conversion alone would swallow them.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::hash::hash256;

const ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Encodes `bytes` as a Base58 string.
pub fn encode_base58(bytes: &[u8]) -> String {
    let leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();

    let mut num = BigUint::from_bytes_be(bytes);
    let mut digits = Vec::new();
    while !num.is_zero() {
        let digit = (&num % 58u32)
            .to_usize()
            .expect("remainder of division by 58 fits in usize");
        digits.push(ALPHABET[digit]);
        num = &num / 58u32;
    }

    let mut out = String::with_capacity(leading_zeros + digits.len());
    for _ in 0..leading_zeros {
        out.push('1');
    }
    for &digit in digits.iter().rev() {
        out.push(char::from(digit));
    }
    out
}

/// Encodes `payload` with a 4-byte `hash256` checksum appended.
pub fn encode_base58_checksum(payload: &[u8]) -> String {
    let checksum = hash256(payload);
    let mut bytes = Vec::with_capacity(payload.len() + 4);
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(&checksum[..4]);
    encode_base58(&bytes)
}
