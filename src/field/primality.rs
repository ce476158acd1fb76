//! Miller-Rabin primality testing.
//!
//! Field construction validates its modulus with [`is_prime`]. The witness
//! set `{2, 3, 5, ..., 37}` makes the test deterministic for candidates
//! below `3.3 * 10^24`; for larger candidates the same witnesses act as a
//! strong probable-prime test, which is adequate for validating the fixed
//! curve moduli used in this crate.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Witnesses making Miller-Rabin deterministic below `3.3 * 10^24`.
const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Returns `true` if `n` is (probably) prime.
pub fn is_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }

    // Trial division by the witnesses doubles as the small-prime base case.
    for w in WITNESSES {
        let w = BigUint::from(w);
        if n == &w {
            return true;
        }
        if (n % &w).is_zero() {
            return false;
        }
    }

    // Write n - 1 = d * 2^s with d odd.
    let n_minus_one = n - BigUint::one();
    let mut d = n_minus_one.clone();
    let mut s = 0u64;
    while !d.bit(0) {
        d >>= 1u32;
        s += 1;
    }

    'witness: for w in WITNESSES {
        let mut x = BigUint::from(w).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}
