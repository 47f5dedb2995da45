//! Primer Crypto Library
//!
//! Textbook RSA over native integers, built for showing the arithmetic:
//! - Key pairs derived from two caller-chosen primes
//! - Unpadded, character-by-character encryption and decryption
//! - A step trace recording every intermediate computation
//!
//! None of this is safe for real secrets. There is no padding, no
//! constant-time arithmetic and no random prime generation.

pub mod codec;
pub mod error;
pub mod keys;
pub mod math;
pub mod trace;

// Re-export key types for convenience.
pub use codec::{CipherSequence, Decrypted, Encrypted, decrypt, decrypt_tokens, encrypt, encrypt_strict};
pub use error::{Result, RsaError};
pub use keys::{DerivedKeys, KeyMaterial, PrivateKey, PublicKey, derive_keys};
pub use math::{gcd, is_prime, mod_inverse, mod_pow};
pub use trace::{StepTrace, TraceInput, TraceRecord};
