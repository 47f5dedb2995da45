//! Number theory primitives behind key derivation and the message codec.
//!
//! All of these are total over `u64` except `mod_pow`, which needs a
//! non-zero modulus. Intermediate products are widened to `u128`.

/// Trial-division primality test.
///
/// Only practical for small `n`: it divides by every odd number up to √n.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let limit = n.isqrt();
    let mut divisor = 3;
    while divisor <= limit {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Greatest common divisor (iterative Euclid). `gcd(a, 0) == a`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Multiplicative inverse of `a` modulo `m`: the unique `x` in `[1, m)` with
/// `a * x ≡ 1 (mod m)`, or `None` when `gcd(a, m) != 1` or `m <= 1`.
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m <= 1 {
        return None;
    }

    // Extended Euclid tracking only the coefficient of `a`.
    let modulus = i128::from(m);
    let (mut old_r, mut r) = (i128::from(a % m), modulus);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let quotient = old_r / r;
        (old_r, r) = (r, old_r - quotient * r);
        (old_s, s) = (s, old_s - quotient * s);
    }

    if old_r != 1 {
        return None;
    }
    // old_s is in (-m, m); fold it into [0, m).
    let x = old_s.rem_euclid(modulus);
    u64::try_from(x).ok()
}

/// `base^exponent mod modulus` by right-to-left square-and-multiply.
///
/// `base` is reduced first and `exponent == 0` yields `1 % modulus`.
/// The result is always in `[0, modulus)`.
///
/// # Panics
/// Panics if `modulus` is zero.
pub fn mod_pow(base: u64, exponent: u64, modulus: u64) -> u64 {
    assert!(modulus != 0, "mod_pow: modulus must be non-zero");

    let m = u128::from(modulus);
    let mut result = 1 % m;
    let mut base = u128::from(base) % m;
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exponent >>= 1;
    }
    // result < modulus, which came from a u64.
    result as u64
}
