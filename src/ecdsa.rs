//! ECDSA signing and verification over secp256k1.
//!
//! Signing is deterministic: the per-signature nonce `k` is derived from
//! the secret and the message hash with HMAC-SHA256 in the manner of
//! [RFC 6979], so no randomness source is needed and nonce reuse cannot
//! happen by accident. Produced signatures are low-s normalized.
//! Verification lives on [`Point`](crate::curve::secp256k1::Point), since
//! it only needs the public point.
//!
//! The signing loop is not constant-time; side-channel hardening is an
//! explicit non-goal of this crate.
//!
//! [RFC 6979]: <https://datatracker.ietf.org/doc/html/rfc6979>

use core::fmt::{self, Debug, Display};

use hmac::{Hmac, Mac};
use num_bigint::BigUint;
use num_traits::One;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::{
    codec::{base58, der},
    curve::secp256k1::{Point, SECP256K1},
    error::{Error, Result},
};

type HmacSha256 = Hmac<Sha256>;

/// An ECDSA signature, the pair `(r, s)`.
///
/// Components are not range-checked at construction; decoding and
/// verification reject out-of-range values where they matter.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Wraps the raw components.
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// The `r` component.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Serializes this signature in DER format.
    pub fn der(&self) -> Vec<u8> {
        der::encode(self)
    }

    /// Deserializes a signature from DER format.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        der::decode(bytes)
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:x}, {:x})", self.r, self.s)
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:x}, {:x})", self.r, self.s)
    }
}

/// An ECDSA private key with its cached public point.
///
/// The public point `secret * G` is computed once at construction and
/// never recomputed. The 32-byte form of the secret, kept for nonce
/// derivation, is wiped when the key is dropped.
pub struct PrivateKey {
    secret: BigUint,
    secret_bytes: [u8; 32],
    point: Point,
}

impl PrivateKey {
    /// Creates a key from a secret scalar.
    ///
    /// # Panics
    ///
    /// Panics if the secret does not fit the fixed 32-byte big-endian
    /// representation.
    pub fn new(secret: BigUint) -> Result<Self> {
        assert!(
            secret.bits() <= 256,
            "private key secret must fit in 32 bytes"
        );
        let secret_bytes = to_bytes_32(&secret);
        let point = Point::generator().mul_scalar(&secret)?;
        Ok(Self { secret, secret_bytes, point })
    }

    /// The derived public point `secret * G`.
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// The secret as a 64-character zero-padded hex string.
    pub fn to_hex(&self) -> String {
        format!("{:064x}", self.secret)
    }

    /// Signs the message hash `z`, producing a low-s normalized signature.
    ///
    /// `r` is the x coordinate of `k * G` taken as a plain integer. It is
    /// not reduced modulo the group order, matching the interchange format
    /// of existing signatures produced this way.
    ///
    /// # Panics
    ///
    /// Panics if `z` does not fit in 32 bytes.
    pub fn sign(&self, z: &BigUint) -> Result<Signature> {
        let n = &SECP256K1.order;
        let k = self.deterministic_k(z);
        let r_point = Point::generator().mul_scalar(&k)?;
        let r = r_point
            .x()
            .ok_or(Error::InvalidSignatureValue)?
            .value()
            .clone();
        let k_inv = k.modpow(&(n - BigUint::from(2u32)), n);
        let s = ((z + &r * &self.secret) % n) * &k_inv % n;
        let s = if s > (n >> 1u32) { n - s } else { s };
        Ok(Signature::new(r, s))
    }

    /// Derives the deterministic nonce for the message hash `z`.
    ///
    /// HMAC-SHA256 chain in the manner of RFC 6979: two bootstrap rounds
    /// mix the secret and the hash into the running key and value, then
    /// candidates are drawn until one lands in `[1, n-1]`. The first
    /// candidate is accepted with overwhelming probability.
    fn deterministic_k(&self, z: &BigUint) -> BigUint {
        let n = &SECP256K1.order;
        let mut k = [0u8; 32];
        let mut v = [1u8; 32];

        let mut z = z.clone();
        if z > *n {
            z -= n;
        }
        let z_bytes = to_bytes_32(&z);

        k = hmac_sha256(&k, &[&v, &[0x00], &self.secret_bytes, &z_bytes]);
        v = hmac_sha256(&k, &[&v]);
        k = hmac_sha256(&k, &[&v, &[0x01], &self.secret_bytes, &z_bytes]);
        v = hmac_sha256(&k, &[&v]);

        loop {
            v = hmac_sha256(&k, &[&v]);
            let candidate = BigUint::from_bytes_be(&v);
            if candidate >= BigUint::one() && candidate < *n {
                return candidate;
            }
            k = hmac_sha256(&k, &[&v, &[0x00]]);
            v = hmac_sha256(&k, &[&v]);
        }
    }

    /// The Wallet Import Format string for this secret.
    ///
    /// The version byte is `0x80` for mainnet and `0xef` for testnet; a
    /// trailing `0x01` marks a compressed public key.
    pub fn wif(&self, compressed: bool, testnet: bool) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(if testnet { 0xef } else { 0x80 });
        payload.extend_from_slice(&self.secret_bytes);
        if compressed {
            payload.push(0x01);
        }
        base58::encode_base58_checksum(&payload)
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The secret is deliberately not printed.
        write!(f, "PrivateKey({})", self.point)
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.secret_bytes.zeroize();
    }
}

/// Fixed 32-byte big-endian form of `value`.
///
/// # Panics
///
/// Panics if the value needs more than 32 bytes.
fn to_bytes_32(value: &BigUint) -> [u8; 32] {
    let bytes = value.to_bytes_be();
    assert!(bytes.len() <= 32, "value must fit in 32 bytes");
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key)
        .expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().into()
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_traits::{One, Zero};

    use super::{PrivateKey, Signature};
    use crate::{
        curve::secp256k1::{Point, SECP256K1},
        error::Error,
        hash::hash256,
    };

    fn biguint(hex: &str) -> BigUint {
        BigUint::parse_bytes(hex.as_bytes(), 16).unwrap()
    }

    #[test]
    fn secret_one_derives_the_generator() {
        let key = PrivateKey::new(BigUint::one()).unwrap();
        assert_eq!(key.point(), &Point::generator());
    }

    #[test]
    fn public_point_for_known_secret() {
        let key = PrivateKey::new(BigUint::from(12_345u32)).unwrap();
        let expected = Point::new(
            biguint("f01d6b9018ab421dd410404cb869072065522bf85734008f105cf385a023a80f"),
            biguint("0eba29d0f0c5408ed681984dc525982abefccd9f7ff01dd26da4999cf3f6a295"),
        )
        .unwrap();
        assert_eq!(key.point(), &expected);
    }

    #[test]
    fn verifies_known_signatures() {
        let point = Point::new(
            biguint("887387e452b8eacc4acfde10d9aaf7f6d9a0f975aabb10d006e4da568744d06c"),
            biguint("61de6d95231cd89026e286df3b6ae4a894a3378e393e93a0f45b666329a0ae34"),
        )
        .unwrap();

        let cases = [
            (
                "ec208baa0fc1c19f708a9ca96fdeff3ac3f230bb4a7ba4aede4942ad003c0f60",
                "ac8d1c87e51d0d441be8b3dd5b05c8795b48875dffe00b7ffcfac23010d3a395",
                "068342ceff8935ededd102dd876ffd6ba72d6a427a3edb13d26eb0781cb423c4",
            ),
            (
                "7c076ff316692a3d7eb3c3bb0f8b1488cf72e1afcd929e29307032997a838a3d",
                "00eff69ef2b1bd93a66ed5219add4fb51e11a840f404876325a1e8ffe0529a2c",
                "c7207fee197d27c618aea621406f6bf5ef6fca38681d82b2f06fddbdce6feab6",
            ),
        ];
        for (z, r, s) in cases {
            let sig = Signature::new(biguint(r), biguint(s));
            assert!(point.verify(&biguint(z), &sig).unwrap());
        }
    }

    #[test]
    fn known_signing_vector() {
        let key = PrivateKey::new(BigUint::from(12_345u32)).unwrap();
        let z = BigUint::from_bytes_be(&hash256(b"Programming Bitcoin!"));
        let sig = key.sign(&z).unwrap();
        assert_eq!(
            sig.r(),
            &biguint("2b698a0f0a4041b77e63488ad48c23e8e8838dd1fb7520408b121697b782ef22")
        );
        assert_eq!(
            sig.s(),
            &biguint("1dbc63bfef4416705e602a7b564161167076d8b20990a0f26f316cff2cb0bc1a")
        );
        assert!(key.point().verify(&z, &sig).unwrap());
    }

    #[test]
    fn signing_is_deterministic() {
        let key = PrivateKey::new(BigUint::from(999u32)).unwrap();
        let z = BigUint::from_bytes_be(&hash256(b"same message"));
        let first = key.sign(&z).unwrap();
        let second = key.sign(&z).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn produced_signatures_are_low_s() {
        let half_order = &SECP256K1.order >> 1u32;
        for secret in [1u32, 2, 42, 12_345, 999_999] {
            let key = PrivateKey::new(BigUint::from(secret)).unwrap();
            let z = BigUint::from_bytes_be(&hash256(&secret.to_be_bytes()));
            let sig = key.sign(&z).unwrap();
            assert!(sig.s() <= &half_order);
        }
    }

    #[test]
    fn message_hash_zero_still_verifies() {
        let key = PrivateKey::new(BigUint::one()).unwrap();
        let z = BigUint::zero();
        let sig = key.sign(&z).unwrap();
        assert!(Point::generator().verify(&z, &sig).unwrap());
    }

    #[test]
    fn tampered_signature_fails_verification() {
        let key = PrivateKey::new(BigUint::from(54_321u32)).unwrap();
        let z = BigUint::from_bytes_be(&hash256(b"tamper with me"));
        let sig = key.sign(&z).unwrap();

        let bad_r =
            Signature::new(sig.r() + BigUint::one(), sig.s().clone());
        assert!(!key.point().verify(&z, &bad_r).unwrap());

        let bad_s =
            Signature::new(sig.r().clone(), sig.s() + BigUint::one());
        assert!(!key.point().verify(&z, &bad_s).unwrap());
    }

    #[test]
    fn zero_s_is_rejected() {
        let sig = Signature::new(BigUint::one(), BigUint::zero());
        let err = Point::generator()
            .verify(&BigUint::one(), &sig)
            .unwrap_err();
        assert_eq!(err, Error::InvalidSignatureValue);
    }

    #[test]
    fn s_congruent_to_zero_is_rejected() {
        // s = n and s = 2n are zero modulo the group order, the same
        // inverse-of-zero class as a literal zero.
        for multiple in [1u32, 2] {
            let s = &SECP256K1.order * BigUint::from(multiple);
            let sig = Signature::new(BigUint::one(), s);
            let err = Point::generator()
                .verify(&BigUint::one(), &sig)
                .unwrap_err();
            assert_eq!(err, Error::InvalidSignatureValue);
        }
    }

    #[test]
    fn hex_rendering_is_zero_padded() {
        let key = PrivateKey::new(BigUint::from(0x1234u32)).unwrap();
        assert_eq!(
            key.to_hex(),
            "0000000000000000000000000000000000000000000000000000000000001234"
        );
    }

    #[test]
    fn wif_vectors() {
        let cases: [(BigUint, bool, bool, &str); 3] = [
            (
                BigUint::from(5003u32),
                true,
                true,
                "cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN8rFTv2sfUK",
            ),
            (
                BigUint::from(2021u32).pow(5),
                false,
                true,
                "91avARGdfge8E4tZfYLoxeJ5sGBdNJQH4kvjpWAxgzczjbCwxic",
            ),
            (
                biguint("54321deadbeef"),
                true,
                false,
                "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgiuQJv1h8Ytr2S53a",
            ),
        ];
        for (secret, compressed, testnet, expected) in cases {
            let key = PrivateKey::new(secret).unwrap();
            assert_eq!(key.wif(compressed, testnet), expected);
        }
    }

    #[test]
    fn address_vectors() {
        let cases: [(BigUint, bool, bool, &str); 3] = [
            (
                BigUint::from(5002u32),
                false,
                true,
                "mmTPbXQFxboEtNRkwfh6K51jvdtHLxGeMA",
            ),
            (
                BigUint::from(2020u32).pow(5),
                true,
                true,
                "mopVkxp8UhXqRYbCYJsbeE1h1fiF64jcoH",
            ),
            (
                biguint("12345deadbeef"),
                true,
                false,
                "1F1Pn2y6pDb68E5nYJJeba4TLg2U7B6KF1",
            ),
        ];
        for (secret, compressed, testnet, expected) in cases {
            let key = PrivateKey::new(secret).unwrap();
            assert_eq!(
                key.point().address(compressed, testnet).unwrap(),
                expected
            );
        }
    }
}
