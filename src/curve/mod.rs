//! Elliptic-curve points in short Weierstrass form, `y^2 = x^3 + a*x + b`.
//!
//! [`CurvePoint`] is generic over the coordinate field (any
//! [`FieldLike`](crate::field::FieldLike) type) and carries its own curve
//! coefficients, so a single group law covers every curve instance. The
//! secp256k1 binding lives in [`secp256k1`].
//!
//! Scalar multiplication is plain double-and-add and runs in time
//! proportional to the scalar's bit length. It is **not** constant-time;
//! side-channel hardening is an explicit non-goal of this crate.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::{
    error::{Error, Result},
    field::FieldLike,
};

pub mod secp256k1;

/// A point on a short Weierstrass curve over the field `F`.
///
/// Either both coordinates are present and satisfy the curve equation, or
/// both are absent and the point is the group identity (the point at
/// infinity). Points are immutable values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurvePoint<F: FieldLike> {
    x: Option<F>,
    y: Option<F>,
    a: F,
    b: F,
}

/// Checks the curve equation `y^2 = x^3 + a*x + b`.
fn is_on_curve<F: FieldLike>(x: &F, y: &F, a: &F, b: &F) -> Result<bool> {
    let rhs = x.square().mul(x)?.add(&a.mul(x)?)?.add(b)?;
    Ok(y.square() == rhs)
}

impl<F: FieldLike> CurvePoint<F> {
    /// Constructs a point from affine coordinates.
    ///
    /// Passing `None` for both coordinates yields the point at infinity.
    /// Fails with [`Error::PointNotOnCurve`] if only one coordinate is
    /// absent or if the coordinates do not satisfy the curve equation.
    pub fn new(x: Option<F>, y: Option<F>, a: F, b: F) -> Result<Self> {
        match (x, y) {
            (None, None) => Ok(Self { x: None, y: None, a, b }),
            (Some(x), Some(y)) => {
                if is_on_curve(&x, &y, &a, &b)? {
                    Ok(Self { x: Some(x), y: Some(y), a, b })
                } else {
                    Err(Error::PointNotOnCurve)
                }
            }
            _ => Err(Error::PointNotOnCurve),
        }
    }

    /// The identity element of the curve group.
    pub fn infinity(a: F, b: F) -> Self {
        Self { x: None, y: None, a, b }
    }

    /// Is this the point at infinity?
    pub fn is_infinity(&self) -> bool {
        self.x.is_none()
    }

    /// The x coordinate, or `None` for the point at infinity.
    pub fn x(&self) -> Option<&F> {
        self.x.as_ref()
    }

    /// The y coordinate, or `None` for the point at infinity.
    pub fn y(&self) -> Option<&F> {
        self.y.as_ref()
    }

    /// Curve coefficient `a`.
    pub fn a(&self) -> &F {
        &self.a
    }

    /// Curve coefficient `b`.
    pub fn b(&self) -> &F {
        &self.b
    }

    /// Group addition: the chord-and-tangent law.
    ///
    /// Fails with [`Error::InvalidCurveParameters`] when the operands do
    /// not share curve coefficients.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.a != other.a || self.b != other.b {
            return Err(Error::InvalidCurveParameters);
        }

        // Identity on either side.
        let (x1, y1) = match (&self.x, &self.y) {
            (Some(x), Some(y)) => (x, y),
            _ => return Ok(other.clone()),
        };
        let (x2, y2) = match (&other.x, &other.y) {
            (Some(x), Some(y)) => (x, y),
            _ => return Ok(self.clone()),
        };

        // Vertical line: additive inverses sum to infinity.
        if x1 == x2 && y1 != y2 {
            return Ok(Self::infinity(self.a.clone(), self.b.clone()));
        }

        // Chord through two distinct points.
        if x1 != x2 {
            let s = y2.sub(y1)?.div(&x2.sub(x1)?)?;
            let x3 = s.square().sub(x1)?.sub(x2)?;
            let y3 = s.mul(&x1.sub(&x3)?)?.sub(y1)?;
            return Self::new(
                Some(x3),
                Some(y3),
                self.a.clone(),
                self.b.clone(),
            );
        }

        // Doubling a point with a vertical tangent.
        if y1.is_zero() {
            return Ok(Self::infinity(self.a.clone(), self.b.clone()));
        }

        // Tangent at a repeated point.
        let two = BigUint::from(2u32);
        let three = BigUint::from(3u32);
        let s = x1
            .square()
            .mul_scalar(&three)
            .add(&self.a)?
            .div(&y1.mul_scalar(&two))?;
        let x3 = s.square().sub(&x1.mul_scalar(&two))?;
        let y3 = s.mul(&x1.sub(&x3)?)?.sub(y1)?;
        Self::new(Some(x3), Some(y3), self.a.clone(), self.b.clone())
    }

    /// Scalar multiplication `k * self` by binary double-and-add.
    ///
    /// The accumulator starts at infinity; the scalar's bits are scanned
    /// from the least significant end, adding the running point on each
    /// set bit and doubling it every iteration.
    pub fn mul_scalar(&self, k: &BigUint) -> Result<Self> {
        let mut coef = k.clone();
        let mut current = self.clone();
        let mut result = Self::infinity(self.a.clone(), self.b.clone());
        while !coef.is_zero() {
            if coef.bit(0) {
                result = result.add(&current)?;
            }
            current = current.add(&current)?;
            coef >>= 1u32;
        }
        Ok(result)
    }
}
