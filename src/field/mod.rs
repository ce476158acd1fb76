//! Arithmetic over a prime finite field GF(p).
//!
//! [`FieldElement`] is a residue class modulo an arbitrary prime `p`,
//! validated at construction. Elements are immutable values; every
//! operation produces a new element, and binary operations require both
//! operands to share the same modulus.
//!
//! Arithmetic is exposed as named fallible methods rather than operator
//! overloads, so that modulus mismatches surface as [`Error::FieldMismatch`]
//! instead of panics.

use core::fmt::{self, Debug, Display};

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::error::{Error, Result};

pub mod primality;

/// The capability a curve point needs from its coordinate type.
///
/// The group law in [`crate::curve`] is generic over this trait, combined
/// with a concrete curve configuration, rather than over a subclass
/// hierarchy. All operations between two elements fail if the elements do
/// not belong to the same field.
pub trait FieldLike: Clone + PartialEq + Debug {
    /// Returns `self + other`.
    fn add(&self, other: &Self) -> Result<Self>;

    /// Returns `self - other`.
    fn sub(&self, other: &Self) -> Result<Self>;

    /// Returns `self * other`.
    fn mul(&self, other: &Self) -> Result<Self>;

    /// Returns `self / other` (multiplication by the Fermat inverse).
    fn div(&self, other: &Self) -> Result<Self>;

    /// Returns `self * self`.
    fn square(&self) -> Self;

    /// Returns `k * self` for an integer scalar `k`, reduced into the
    /// field. Negation is `mul_scalar(p - 1)`.
    fn mul_scalar(&self, k: &BigUint) -> Self;

    /// Is this the additive identity?
    fn is_zero(&self) -> bool;
}

/// An element of the prime field GF(p).
///
/// Invariant: `0 <= value < prime`, and `prime` passed the primality check
/// at construction. Two elements are equal iff both `value` and `prime`
/// match.
#[derive(Clone, PartialEq, Eq)]
pub struct FieldElement {
    value: BigUint,
    prime: BigUint,
}

impl FieldElement {
    /// Constructs the residue class of `value` modulo `prime`.
    ///
    /// The value is reduced into `[0, prime)`. Fails with
    /// [`Error::NonPrimeModulus`] if `prime` is not prime.
    pub fn new(value: BigUint, prime: BigUint) -> Result<Self> {
        if !primality::is_prime(&prime) {
            return Err(Error::NonPrimeModulus);
        }
        Ok(Self { value: value % &prime, prime })
    }

    /// The canonical representative in `[0, prime)`.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The field modulus.
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// Returns `self^exponent`.
    ///
    /// The exponent is first reduced into `[0, p - 1)` modulo `p - 1`,
    /// which is valid for nonzero bases because the multiplicative group
    /// of GF(p) has order `p - 1`. Negative exponents therefore compute
    /// multiplicative inverses. Note the reduction is *not* meaningful for
    /// a zero base: `0^e` stays zero for every normalized exponent.
    #[must_use]
    pub fn pow(&self, exponent: &BigInt) -> Self {
        let group_order = BigInt::from(&self.prime - BigUint::one());
        // `%` follows the dividend's sign; shift negatives into range.
        let exp = ((exponent % &group_order) + &group_order) % &group_order;
        let exp = exp.to_biguint().expect("exponent is reduced into [0, p-1)");
        Self {
            value: self.value.modpow(&exp, &self.prime),
            prime: self.prime.clone(),
        }
    }

    fn same_field(&self, other: &Self) -> Result<()> {
        if self.prime == other.prime {
            Ok(())
        } else {
            Err(Error::FieldMismatch)
        }
    }
}

impl FieldLike for FieldElement {
    fn add(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        Ok(Self {
            value: (&self.value + &other.value) % &self.prime,
            prime: self.prime.clone(),
        })
    }

    fn sub(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        Ok(Self {
            value: (&self.value + &self.prime - &other.value) % &self.prime,
            prime: self.prime.clone(),
        })
    }

    fn mul(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        Ok(Self {
            value: (&self.value * &other.value) % &self.prime,
            prime: self.prime.clone(),
        })
    }

    /// Division via the Fermat inverse: `a / b = a * b^(p-2) mod p`.
    ///
    /// There is no explicit zero-divisor guard: the "inverse" of zero is
    /// zero, so dividing by zero yields zero rather than an error.
    fn div(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        let exp = &self.prime - BigUint::from(2u32);
        let inverse = other.value.modpow(&exp, &self.prime);
        Ok(Self {
            value: (&self.value * inverse) % &self.prime,
            prime: self.prime.clone(),
        })
    }

    fn square(&self) -> Self {
        Self {
            value: (&self.value * &self.value) % &self.prime,
            prime: self.prime.clone(),
        }
    }

    fn mul_scalar(&self, k: &BigUint) -> Self {
        Self {
            value: (&self.value * k) % &self.prime,
            prime: self.prime.clone(),
        }
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement_{}({})", self.prime, self.value)
    }
}

impl Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::{BigInt, BigUint};
    use num_traits::One;

    use super::{FieldElement, FieldLike};
    use crate::error::Error;

    fn fe(value: u32, prime: u32) -> FieldElement {
        FieldElement::new(BigUint::from(value), BigUint::from(prime)).unwrap()
    }

    #[test]
    fn rejects_non_prime_modulus() {
        let err =
            FieldElement::new(BigUint::from(3u32), BigUint::from(15u32));
        assert_eq!(err, Err(Error::NonPrimeModulus));
    }

    #[test]
    fn reduces_value_at_construction() {
        assert_eq!(fe(40, 31), fe(9, 31));
    }

    #[test]
    fn equality_requires_matching_modulus() {
        assert_eq!(fe(2, 31), fe(2, 31));
        assert_ne!(fe(2, 31), fe(2, 37));
        assert_ne!(fe(2, 31), fe(15, 31));
    }

    #[test]
    fn add() {
        assert_eq!(fe(2, 31).add(&fe(15, 31)).unwrap(), fe(17, 31));
        assert_eq!(fe(17, 31).add(&fe(21, 31)).unwrap(), fe(7, 31));
    }

    #[test]
    fn sub() {
        assert_eq!(fe(29, 31).sub(&fe(4, 31)).unwrap(), fe(25, 31));
        assert_eq!(fe(15, 31).sub(&fe(30, 31)).unwrap(), fe(16, 31));
    }

    #[test]
    fn mul() {
        assert_eq!(fe(24, 31).mul(&fe(19, 31)).unwrap(), fe(22, 31));
    }

    #[test]
    fn pow() {
        assert_eq!(fe(17, 31).pow(&BigInt::from(3)), fe(15, 31));
        assert_eq!(
            fe(5, 31).pow(&BigInt::from(5)).mul(&fe(18, 31)).unwrap(),
            fe(16, 31)
        );
    }

    #[test]
    fn negative_exponent_is_an_inverse() {
        assert_eq!(fe(17, 31).pow(&BigInt::from(-3)), fe(29, 31));
        assert_eq!(
            fe(4, 31).pow(&BigInt::from(-4)).mul(&fe(11, 31)).unwrap(),
            fe(13, 31)
        );
    }

    #[test]
    fn div() {
        assert_eq!(fe(3, 31).div(&fe(24, 31)).unwrap(), fe(4, 31));
    }

    #[test]
    fn mismatched_moduli_are_rejected() {
        let a = fe(2, 31);
        let b = fe(2, 37);
        assert_eq!(a.add(&b), Err(Error::FieldMismatch));
        assert_eq!(a.sub(&b), Err(Error::FieldMismatch));
        assert_eq!(a.mul(&b), Err(Error::FieldMismatch));
        assert_eq!(a.div(&b), Err(Error::FieldMismatch));
    }

    #[test]
    fn add_then_sub_round_trips() {
        let a = fe(17, 223);
        let b = fe(142, 223);
        assert_eq!(a.add(&b).unwrap().sub(&b).unwrap(), a);
    }

    #[test]
    fn fermat_inverse() {
        let p = 223u32;
        for v in [1u32, 2, 77, 222] {
            let a = fe(v, p);
            let inv = a.pow(&BigInt::from(-1));
            assert_eq!(a.mul(&inv).unwrap(), fe(1, p));
        }
    }

    #[test]
    fn fermat_little_theorem() {
        let p = 223u32;
        for v in [1u32, 5, 100, 222] {
            assert_eq!(fe(v, p).pow(&BigInt::from(p - 1)), fe(1, p));
        }
    }

    #[test]
    fn zero_base_with_negative_exponent_stays_zero() {
        // 0 has no inverse; the exponent reduction silently maps
        // 0^(-1) to 0^(p-2) which is still 0, not an error.
        let zero = fe(0, 31);
        assert_eq!(zero.pow(&BigInt::from(-1)), zero);
    }

    #[test]
    fn division_by_zero_yields_zero() {
        // The Fermat "inverse" of zero is zero, so a/0 == 0.
        let a = fe(7, 31);
        let zero = fe(0, 31);
        assert_eq!(a.div(&zero).unwrap(), zero);
    }

    #[test]
    fn square_and_mul_scalar() {
        assert_eq!(fe(5, 31).square(), fe(25, 31));
        assert_eq!(fe(5, 31).mul_scalar(&BigUint::from(3u32)), fe(15, 31));
        assert_eq!(fe(20, 31).mul_scalar(&BigUint::from(2u32)), fe(9, 31));
    }

    #[test]
    fn scalar_multiple_p_minus_one_negates() {
        // p - 1 is congruent to -1, so multiplying by it negates.
        let a = fe(7, 31);
        let neg = a.mul_scalar(&BigUint::from(30u32));
        assert!(a.add(&neg).unwrap().is_zero());

        let p = (BigUint::one() << 256u32)
            - (BigUint::one() << 32u32)
            - BigUint::from(977u32);
        let a = FieldElement::new(BigUint::from(12_345u32), p.clone())
            .unwrap();
        let neg = a.mul_scalar(&(&p - BigUint::one()));
        assert!(a.add(&neg).unwrap().is_zero());
    }

    #[test]
    fn works_with_large_prime() {
        let p = (BigUint::one() << 256u32)
            - (BigUint::one() << 32u32)
            - BigUint::from(977u32);
        let a = FieldElement::new(BigUint::from(12_345u32), p.clone())
            .unwrap();
        let inv = a.pow(&BigInt::from(-1));
        assert_eq!(
            a.mul(&inv).unwrap(),
            FieldElement::new(BigUint::one(), p).unwrap()
        );
    }
}
