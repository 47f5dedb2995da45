use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RsaError};
use crate::math::{gcd, is_prime, mod_inverse};
use crate::trace::{StepTrace, TraceInput};

/// Public half of a key pair: encrypts with `c = m^e mod n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub e: u64,
    pub n: u64,
}

/// Private half of a key pair: decrypts with `m = c^d mod n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    pub d: u64,
    pub n: u64,
}

/// Everything computed while deriving a key pair from two primes.
///
/// Only `derive_keys` builds one, so the RSA invariants always hold:
/// `n = p * q`, `φ = (p - 1)(q - 1)`, `0 < e < φ`, `gcd(e, φ) = 1`,
/// `0 < d < φ` and `d * e ≡ 1 (mod φ)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyMaterial {
    p: u64,
    q: u64,
    n: u64,
    phi: u64,
    e: u64,
    d: u64,
}

impl KeyMaterial {
    pub fn p(&self) -> u64 {
        self.p
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// Modulus `p * q`.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Euler's totient `(p - 1)(q - 1)`. Kept for display only.
    pub fn phi(&self) -> u64 {
        self.phi
    }

    pub fn e(&self) -> u64 {
        self.e
    }

    pub fn d(&self) -> u64 {
        self.d
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey { e: self.e, n: self.n }
    }

    pub fn private_key(&self) -> PrivateKey {
        PrivateKey { d: self.d, n: self.n }
    }
}

/// Result of `derive_keys`: the key material plus its four-step trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedKeys {
    pub keys: KeyMaterial,
    pub trace: StepTrace,
}

/// Derive an RSA key pair from two distinct primes.
///
/// Primes are `u32` so the modulus always fits in a `u64`. The public
/// exponent is the smallest odd `e >= 3` coprime with φ(n); 65537 is not
/// preferred.
pub fn derive_keys(p: u32, q: u32) -> Result<DerivedKeys> {
    let (p, q) = (u64::from(p), u64::from(q));

    if !is_prime(p) {
        return Err(RsaError::InvalidPrime { name: "p", value: p });
    }
    if !is_prime(q) {
        return Err(RsaError::InvalidPrime { name: "q", value: q });
    }
    if p == q {
        return Err(RsaError::DuplicatePrime { value: p });
    }

    let n = p * q;
    let phi = (p - 1) * (q - 1);
    let e = choose_exponent(phi).ok_or(RsaError::NoValidExponent { phi })?;
    let d = mod_inverse(e, phi).ok_or(RsaError::KeyDerivationFailed { e, phi })?;

    let mut trace = StepTrace::with_capacity(4);
    trace.push(
        TraceInput::Parameter { name: "n" },
        format!("p * q = {} * {}", p, q),
        n,
        None,
    );
    trace.push(
        TraceInput::Parameter { name: "φ(n)" },
        format!("(p - 1) * (q - 1) = {} * {}", p - 1, q - 1),
        phi,
        None,
    );
    trace.push(
        TraceInput::Parameter { name: "e" },
        format!("gcd({}, {}) = 1, coprime with φ(n)", e, phi),
        e,
        None,
    );
    trace.push(
        TraceInput::Parameter { name: "d" },
        format!("e^-1 mod φ(n) = {}^-1 mod {}", e, phi),
        d,
        None,
    );

    debug!(n, phi, e, "Derived key pair");

    Ok(DerivedKeys {
        keys: KeyMaterial { p, q, n, phi, e, d },
        trace,
    })
}

/// First odd `e` in `[3, phi)` with `gcd(e, phi) == 1`.
fn choose_exponent(phi: u64) -> Option<u64> {
    (3..phi).step_by(2).find(|&e| gcd(e, phi) == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textbook_pair() {
        let derived = derive_keys(11, 13).unwrap();
        let keys = derived.keys;
        assert_eq!(keys.n(), 143);
        assert_eq!(keys.phi(), 120);
        assert_eq!(keys.e(), 7);
        assert_eq!(keys.d(), 103);
        assert_eq!(keys.public_key(), PublicKey { e: 7, n: 143 });
        assert_eq!(keys.private_key(), PrivateKey { d: 103, n: 143 });
    }

    #[test]
    fn test_trace_has_four_steps() {
        let derived = derive_keys(11, 13).unwrap();
        let lines: Vec<String> = derived.trace.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "n: p * q = 11 * 13 = 143",
                "φ(n): (p - 1) * (q - 1) = 10 * 12 = 120",
                "e: gcd(7, 120) = 1, coprime with φ(n) = 7",
                "d: e^-1 mod φ(n) = 7^-1 mod 120 = 103",
            ]
        );

        for (p, q) in [(3, 5), (61, 53), (1009, 2003), (65_521, 65_519)] {
            assert_eq!(derive_keys(p, q).unwrap().trace.len(), 4);
        }
    }

    #[test]
    fn test_invariants_hold() {
        let primes = [3u32, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 97, 101, 7919];
        for &p in &primes {
            for &q in &primes {
                if p == q {
                    continue;
                }
                let keys = derive_keys(p, q).unwrap().keys;
                let phi = keys.phi();
                assert_eq!(keys.n(), u64::from(p) * u64::from(q));
                assert_eq!(phi, u64::from(p - 1) * u64::from(q - 1));
                assert!(keys.e() > 0 && keys.e() < phi);
                assert!(keys.d() > 0 && keys.d() < phi);
                assert_eq!(gcd(keys.e(), phi), 1);
                assert_eq!(keys.e() * keys.d() % phi, 1);
                assert_eq!(keys.e() % 2, 1);
            }
        }
    }

    #[test]
    fn test_rejects_non_primes() {
        assert_eq!(
            derive_keys(4, 9).unwrap_err(),
            RsaError::InvalidPrime { name: "p", value: 4 }
        );
        assert_eq!(
            derive_keys(11, 9).unwrap_err(),
            RsaError::InvalidPrime { name: "q", value: 9 }
        );
        assert!(matches!(derive_keys(0, 7), Err(RsaError::InvalidPrime { .. })));
        assert!(matches!(derive_keys(7, 1), Err(RsaError::InvalidPrime { .. })));
    }

    #[test]
    fn test_rejects_duplicate_prime() {
        assert_eq!(derive_keys(7, 7).unwrap_err(), RsaError::DuplicatePrime { value: 7 });
    }

    #[test]
    fn test_no_exponent_for_tiny_totient() {
        // φ(6) = 2 leaves no candidate below it.
        assert_eq!(derive_keys(2, 3).unwrap_err(), RsaError::NoValidExponent { phi: 2 });
        assert_eq!(derive_keys(3, 2).unwrap_err(), RsaError::NoValidExponent { phi: 2 });
    }

    #[test]
    fn test_smallest_pairs_with_two() {
        // φ(10) = 4: e = 3, d = 3.
        let keys = derive_keys(2, 5).unwrap().keys;
        assert_eq!((keys.e(), keys.d()), (3, 3));
    }

    #[test]
    fn test_largest_supported_primes() {
        let keys = derive_keys(4_294_967_291, 4_294_967_279).unwrap().keys;
        assert_eq!(keys.n(), 4_294_967_291u64 * 4_294_967_279);
        let product = u128::from(keys.e()) * u128::from(keys.d());
        assert_eq!(product % u128::from(keys.phi()), 1);
    }

    #[test]
    fn test_skips_exponents_sharing_factors() {
        // φ = 60 * 52 = 3120 = 2^4 * 3 * 5 * 13, so 3 and 5 are skipped.
        let keys = derive_keys(61, 53).unwrap().keys;
        assert_eq!(keys.e(), 7);
        assert_eq!(keys.d(), 1783);
    }
}
