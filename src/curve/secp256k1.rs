//! The [secp256k1] curve binding: `y^2 = x^3 + 7` over
//! `GF(2^256 - 2^32 - 977)`.
//!
//! Domain parameters are built once, lazily, and shared process-wide as
//! the immutable [`struct@SECP256K1`] value. [`Point`] specializes the
//! generic [`CurvePoint`] to this curve: construction rejects any other
//! coefficients, and scalar multiplication reduces the scalar modulo the
//! group order `n` first (valid because `n * G` is the identity).
//!
//! [secp256k1]: <https://www.secg.org/sec2-v2.pdf>

use core::fmt::{self, Display};

use hex_literal::hex;
use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::{
    codec::sec,
    curve::CurvePoint,
    ecdsa::Signature,
    error::{Error, Result},
    field::FieldElement,
    hash,
};

const GENERATOR_X: [u8; 32] =
    hex!("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
const GENERATOR_Y: [u8; 32] =
    hex!("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8");
const GROUP_ORDER: [u8; 32] =
    hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");

lazy_static! {
    /// Process-wide secp256k1 domain parameters.
    pub static ref SECP256K1: CurveParams = CurveParams::build();
}

/// The fixed secp256k1 domain parameters.
///
/// Constructed once at first use and never mutated; every [`Point`] and
/// every ECDSA operation borrows from this value.
pub struct CurveParams {
    /// The field prime, `2^256 - 2^32 - 977`.
    pub prime: BigUint,
    /// Curve coefficient `a = 0`.
    pub a: FieldElement,
    /// Curve coefficient `b = 7`.
    pub b: FieldElement,
    /// The conventional generator point `G`.
    pub generator: Point,
    /// The order `n` of the group generated by `G`.
    pub order: BigUint,
}

impl CurveParams {
    fn build() -> Self {
        let prime = (BigUint::one() << 256u32)
            - (BigUint::one() << 32u32)
            - BigUint::from(977u32);
        let a = FieldElement::new(BigUint::zero(), prime.clone())
            .expect("the secp256k1 prime is prime");
        let b = FieldElement::new(BigUint::from(7u32), prime.clone())
            .expect("the secp256k1 prime is prime");
        let gx = FieldElement::new(
            BigUint::from_bytes_be(&GENERATOR_X),
            prime.clone(),
        )
        .expect("the secp256k1 prime is prime");
        let gy = FieldElement::new(
            BigUint::from_bytes_be(&GENERATOR_Y),
            prime.clone(),
        )
        .expect("the secp256k1 prime is prime");
        let generator = Point {
            inner: CurvePoint::new(Some(gx), Some(gy), a.clone(), b.clone())
                .expect("the generator is on the curve"),
        };
        let order = BigUint::from_bytes_be(&GROUP_ORDER);
        Self { prime, a, b, generator, order }
    }
}

/// Square root in the secp256k1 base field.
///
/// Computes `x^((p+1)/4)`, which is a square root of `x` whenever one
/// exists because this prime is congruent to 3 modulo 4. The result must
/// be squared and compared when `x` is not known to be a quadratic
/// residue: for a non-residue the returned value is *not* a root. Fails
/// with [`Error::FieldMismatch`] for elements of any other field, as the
/// shortcut is specific to this prime.
pub fn field_sqrt(x: &FieldElement) -> Result<FieldElement> {
    let params = &*SECP256K1;
    if *x.prime() != params.prime {
        return Err(Error::FieldMismatch);
    }
    let exp = (&params.prime + BigUint::one()) >> 2u32;
    Ok(x.pow(&exp.into()))
}

/// A point on secp256k1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    inner: CurvePoint<FieldElement>,
}

impl Point {
    /// Constructs a point from affine coordinates, checking the curve
    /// equation.
    pub fn new(x: BigUint, y: BigUint) -> Result<Self> {
        let params = &*SECP256K1;
        let x = FieldElement::new(x, params.prime.clone())?;
        let y = FieldElement::new(y, params.prime.clone())?;
        let inner = CurvePoint::new(
            Some(x),
            Some(y),
            params.a.clone(),
            params.b.clone(),
        )?;
        Ok(Self { inner })
    }

    /// Wraps a generic curve point, rejecting any curve other than
    /// secp256k1.
    pub fn from_curve_point(point: CurvePoint<FieldElement>) -> Result<Self> {
        let params = &*SECP256K1;
        if *point.a() != params.a || *point.b() != params.b {
            return Err(Error::InvalidCurveParameters);
        }
        Ok(Self { inner: point })
    }

    /// The point at infinity.
    pub fn infinity() -> Self {
        let params = &*SECP256K1;
        Self {
            inner: CurvePoint::infinity(params.a.clone(), params.b.clone()),
        }
    }

    /// The generator point `G`.
    pub fn generator() -> Self {
        SECP256K1.generator.clone()
    }

    /// Is this the point at infinity?
    pub fn is_infinity(&self) -> bool {
        self.inner.is_infinity()
    }

    /// The x coordinate, or `None` for the point at infinity.
    pub fn x(&self) -> Option<&FieldElement> {
        self.inner.x()
    }

    /// The y coordinate, or `None` for the point at infinity.
    pub fn y(&self) -> Option<&FieldElement> {
        self.inner.y()
    }

    /// Group addition.
    pub fn add(&self, other: &Self) -> Result<Self> {
        Ok(Self { inner: self.inner.add(&other.inner)? })
    }

    /// Scalar multiplication, reducing the scalar modulo the group order
    /// first.
    pub fn mul_scalar(&self, k: &BigUint) -> Result<Self> {
        let coef = k % &SECP256K1.order;
        Ok(Self { inner: self.inner.mul_scalar(&coef)? })
    }

    /// ECDSA verification.
    ///
    /// Checks that `(z/s)*G + (r/s)*self` has x coordinate `r`. An `s`
    /// congruent to zero modulo the group order has no modular inverse and
    /// is rejected with [`Error::InvalidSignatureValue`].
    pub fn verify(&self, z: &BigUint, signature: &Signature) -> Result<bool> {
        let n = &SECP256K1.order;
        if (signature.s() % n).is_zero() {
            return Err(Error::InvalidSignatureValue);
        }
        let s_inv =
            signature.s().modpow(&(n - BigUint::from(2u32)), n);
        let u = z * &s_inv % n;
        let v = signature.r() * &s_inv % n;
        let total = Point::generator()
            .mul_scalar(&u)?
            .add(&self.mul_scalar(&v)?)?;
        Ok(match total.x() {
            Some(x) => x.value() == signature.r(),
            None => false,
        })
    }

    /// Serializes this point in SEC format.
    pub fn sec(&self, compressed: bool) -> Result<Vec<u8>> {
        sec::encode(self, compressed)
    }

    /// Deserializes a point from SEC format.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        sec::decode(bytes)
    }

    /// `RIPEMD160(SHA256(sec))` of this point's SEC encoding.
    pub fn hash160(&self, compressed: bool) -> Result<[u8; 20]> {
        Ok(hash::hash160(&self.sec(compressed)?))
    }

    /// The Base58Check address for this public point.
    ///
    /// The version byte is `0x00` for mainnet and `0x6f` for testnet.
    pub fn address(&self, compressed: bool, testnet: bool) -> Result<String> {
        let prefix: u8 = if testnet { 0x6f } else { 0x00 };
        let mut payload = Vec::with_capacity(21);
        payload.push(prefix);
        payload.extend_from_slice(&self.hash160(compressed)?);
        Ok(crate::codec::base58::encode_base58_checksum(&payload))
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.x(), self.y()) {
            (Some(x), Some(y)) => {
                write!(f, "Point({:064x}, {:064x})", x.value(), y.value())
            }
            _ => write!(f, "Point(infinity)"),
        }
    }
}
