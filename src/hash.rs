//! Composite hash helpers.
//!
//! Two stateless combinations used by the codecs and by address/WIF
//! formatting: `hash256` (two rounds of SHA-256) and `hash160` (SHA-256
//! followed by RIPEMD-160).

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Two rounds of SHA-256.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// SHA-256 followed by RIPEMD-160.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}
