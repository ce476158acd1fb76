//! Crate error type.
//!
//! Every failure in this crate stems from malformed input or a violated
//! construction invariant; there is no transient condition to retry.
//! Callers are expected to reject the offending input wholesale.

use core::fmt;

/// Result type.
///
/// A result with this crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by field, curve, signature and codec operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A field was constructed with a modulus that is not prime.
    NonPrimeModulus,
    /// A binary field operation mixed elements of different moduli.
    FieldMismatch,
    /// A point was constructed against the wrong curve coefficients, or two
    /// points on different curves were combined.
    InvalidCurveParameters,
    /// Coordinates do not satisfy the curve equation.
    PointNotOnCurve,
    /// A DER signature violates tag, length or marker expectations.
    MalformedSignature,
    /// A SEC point encoding has an unrecognized prefix or does not decode to
    /// a valid curve point.
    MalformedPoint,
    /// A signature component is outside the valid range (e.g. `s = 0`),
    /// which would require a modular inverse of zero.
    InvalidSignatureValue,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::NonPrimeModulus => "field modulus is not prime",
            Error::FieldMismatch => {
                "cannot operate on two numbers in different fields"
            }
            Error::InvalidCurveParameters => {
                "points are not on the same curve"
            }
            Error::PointNotOnCurve => "coordinates are not on the curve",
            Error::MalformedSignature => "malformed DER signature",
            Error::MalformedPoint => "malformed SEC point encoding",
            Error::InvalidSignatureValue => {
                "signature component out of range"
            }
        };

        write!(f, "{msg}")
    }
}

impl std::error::Error for Error {}
