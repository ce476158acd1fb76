//! SEC encoding of secp256k1 points.
//!
//! Uncompressed form is `0x04 || x || y` (65 bytes); compressed form is
//! `0x02 || x` for even `y` or `0x03 || x` for odd `y` (33 bytes), with
//! the full `y` recovered on decode from the curve equation and a square
//! root in the base field. Coordinates are fixed-width 32-byte big-endian.

use num_bigint::BigUint;
use num_traits::One;

use crate::{
    curve::secp256k1::{field_sqrt, Point, SECP256K1},
    error::{Error, Result},
    field::{FieldElement, FieldLike},
};

const UNCOMPRESSED_MARKER: u8 = 0x04;
const EVEN_MARKER: u8 = 0x02;
const ODD_MARKER: u8 = 0x03;

/// Serializes a point in SEC format.
///
/// The point at infinity has no SEC form and fails with
/// [`Error::MalformedPoint`].
pub fn encode(point: &Point, compressed: bool) -> Result<Vec<u8>> {
    let (x, y) = match (point.x(), point.y()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(Error::MalformedPoint),
    };
    if compressed {
        let marker = if y.value().bit(0) { ODD_MARKER } else { EVEN_MARKER };
        let mut out = Vec::with_capacity(33);
        out.push(marker);
        out.extend_from_slice(&coordinate_bytes(x));
        Ok(out)
    } else {
        let mut out = Vec::with_capacity(65);
        out.push(UNCOMPRESSED_MARKER);
        out.extend_from_slice(&coordinate_bytes(x));
        out.extend_from_slice(&coordinate_bytes(y));
        Ok(out)
    }
}

/// Deserializes a point from SEC format, compressed or uncompressed.
///
/// Fails with [`Error::MalformedPoint`] on an unknown marker, a wrong
/// length, or coordinates that do not land on the curve. For compressed
/// input the candidate root is squared back and checked, so an `x` whose
/// curve equation value is a non-residue is rejected rather than decoded
/// into garbage.
pub fn decode(bytes: &[u8]) -> Result<Point> {
    match bytes.first() {
        Some(&UNCOMPRESSED_MARKER) => {
            if bytes.len() != 65 {
                return Err(Error::MalformedPoint);
            }
            let x = BigUint::from_bytes_be(&bytes[1..33]);
            let y = BigUint::from_bytes_be(&bytes[33..65]);
            Point::new(x, y).map_err(|_| Error::MalformedPoint)
        }
        Some(&(marker @ (EVEN_MARKER | ODD_MARKER))) => {
            if bytes.len() != 33 {
                return Err(Error::MalformedPoint);
            }
            let params = &*SECP256K1;
            let x = FieldElement::new(
                BigUint::from_bytes_be(&bytes[1..]),
                params.prime.clone(),
            )?;
            // Right side of y^2 = x^3 + 7 (a is zero on this curve).
            let alpha = x.square().mul(&x)?.add(&params.b)?;
            let beta = field_sqrt(&alpha)?;
            if beta.square() != alpha {
                return Err(Error::MalformedPoint);
            }
            let beta_is_odd = beta.value().bit(0);
            let want_odd = marker == ODD_MARKER;
            let y = if beta_is_odd == want_odd {
                beta
            } else {
                // The other root is -beta, reached by scaling with p - 1.
                beta.mul_scalar(&(&params.prime - BigUint::one()))
            };
            Point::new(x.value().clone(), y.value().clone())
        }
        _ => Err(Error::MalformedPoint),
    }
}

/// Fixed-width 32-byte big-endian form of a coordinate.
fn coordinate_bytes(fe: &FieldElement) -> [u8; 32] {
    let bytes = fe.value().to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}
