//! Wire encodings for signatures and public points.
//!
//! [`der`] carries ECDSA signatures, [`sec`] carries curve points in
//! compressed or uncompressed form, and [`base58`] renders checksummed
//! payloads for addresses and WIF keys.

pub mod base58;
pub mod der;
pub mod sec;
