use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, RsaError>;

/// Every way key derivation, encryption or decryption can be refused.
///
/// Errors carry enough context to build a user-facing message (which prime,
/// which ciphertext element) but never a private exponent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsaError {
    /// One of the two primes is not prime.
    #[error("{name} = {value} is not a prime number")]
    InvalidPrime { name: &'static str, value: u64 },

    /// Both primes are the same number.
    #[error("p and q must be different primes (both are {value})")]
    DuplicatePrime { value: u64 },

    /// No odd exponent below φ(n) is coprime with it.
    #[error("no public exponent e < φ(n) = {phi} is coprime with φ(n)")]
    NoValidExponent { phi: u64 },

    /// The chosen exponent has no inverse modulo φ(n).
    #[error("e = {e} has no inverse modulo φ(n) = {phi}")]
    KeyDerivationFailed { e: u64, phi: u64 },

    /// A ciphertext element is not a usable integer for this key.
    #[error("ciphertext element {index} ({token:?}) {reason}")]
    MalformedCiphertext {
        index: usize,
        token: String,
        reason: &'static str,
    },

    /// A plaintext character does not fit below the modulus.
    #[error("character {character:?} at position {index} has code point {} >= n = {modulus}", code_point(.character))]
    OutOfRangeCharacter {
        index: usize,
        character: char,
        modulus: u64,
    },
}

fn code_point(c: &char) -> u32 {
    *c as u32
}

impl RsaError {
    /// Stable snake_case name of the failure kind, for API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPrime { .. } => "invalid_prime",
            Self::DuplicatePrime { .. } => "duplicate_prime",
            Self::NoValidExponent { .. } => "no_valid_exponent",
            Self::KeyDerivationFailed { .. } => "key_derivation_failed",
            Self::MalformedCiphertext { .. } => "malformed_ciphertext",
            Self::OutOfRangeCharacter { .. } => "out_of_range_character",
        }
    }
}
