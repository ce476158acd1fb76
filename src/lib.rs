/*!
Elliptic-curve cryptography built up from first principles.

This crate implements, layer by layer, everything needed for ECDSA over
secp256k1: prime-field arithmetic with a validated modulus, the short
Weierstrass group law generic over the coordinate field, the secp256k1
domain parameters, deterministic signing, and the DER, SEC and
Base58Check wire formats.

The arithmetic favors clarity over speed: scalars are arbitrary-precision
integers and nothing is constant-time. Do not use this crate to guard
real keys; use it to understand what the hardened libraries are doing.

# Example

```rust
use curvebook::{ecdsa::PrivateKey, hash::hash256};
use num_bigint::BigUint;

let key = PrivateKey::new(BigUint::from(12_345u32)).unwrap();
let z = BigUint::from_bytes_be(&hash256(b"a signed message"));

let signature = key.sign(&z).unwrap();
assert!(key.point().verify(&z, &signature).unwrap());

// Signatures and points have standard wire forms.
let der = signature.der();
let sec = key.point().sec(true).unwrap();
assert_eq!(der.len(), usize::from(der[1]) + 2);
assert_eq!(sec.len(), 33);
```
*/

pub mod codec;
pub mod curve;
pub mod ecdsa;
pub mod error;
pub mod field;
pub mod hash;

pub use crate::{
    curve::{
        secp256k1::{Point, SECP256K1},
        CurvePoint,
    },
    ecdsa::{PrivateKey, Signature},
    error::{Error, Result},
    field::{FieldElement, FieldLike},
};
