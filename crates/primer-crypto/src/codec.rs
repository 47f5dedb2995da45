use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, RsaError};
use crate::keys::{PrivateKey, PublicKey};
use crate::math::mod_pow;
use crate::trace::{StepTrace, TraceInput};

/// Ciphertext integers, one per plaintext character, in plaintext order.
///
/// Textual form is decimal integers separated by whitespace and/or commas.
/// `Display` writes them space-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CipherSequence(Vec<u64>);

impl CipherSequence {
    /// Parse pre-split tokens, rejecting the first one that is not a
    /// non-negative decimal integer.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        tokens
            .iter()
            .enumerate()
            .map(|(index, token)| parse_element(index, token.as_ref()))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Number of elements in a textual list, without parsing them.
    pub fn count_elements(s: &str) -> usize {
        split_elements(s).count()
    }

    pub fn values(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }
}

impl From<Vec<u64>> for CipherSequence {
    fn from(values: Vec<u64>) -> Self {
        Self(values)
    }
}

impl FromStr for CipherSequence {
    type Err = RsaError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = split_elements(s).collect();
        Self::from_tokens(&tokens)
    }
}

fn split_elements(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

impl fmt::Display for CipherSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

fn parse_element(index: usize, token: &str) -> Result<u64> {
    // u64::from_str accepts a leading '+', which is not part of the list format.
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RsaError::MalformedCiphertext {
            index,
            token: token.to_string(),
            reason: "is not a non-negative integer",
        });
    }
    token.parse().map_err(|_| RsaError::MalformedCiphertext {
        index,
        token: token.to_string(),
        reason: "does not fit in 64 bits",
    })
}

/// Output of `encrypt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encrypted {
    pub ciphertext: CipherSequence,
    pub trace: StepTrace,
}

/// Output of `decrypt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decrypted {
    pub plaintext: String,
    pub trace: StepTrace,
}

/// Encrypt each character independently as `code^e mod n`.
///
/// Code points at or above `n` wrap modulo `n` and will not decrypt back
/// to the original character. Use `encrypt_strict` to refuse them instead.
pub fn encrypt(plaintext: &str, key: &PublicKey) -> Encrypted {
    let count = plaintext.chars().count();
    let mut values = Vec::with_capacity(count);
    let mut trace = StepTrace::with_capacity(count);

    for character in plaintext.chars() {
        let code = u64::from(character);
        let value = mod_pow(code, key.e, key.n);
        trace.push(
            TraceInput::Character { character, code },
            format!("{}^{} mod {}", code, key.e, key.n),
            value,
            None,
        );
        values.push(value);
    }

    debug!(chars = count, n = key.n, e = key.e, "Encrypted message");

    Encrypted {
        ciphertext: CipherSequence(values),
        trace,
    }
}

/// Like `encrypt`, but fails on the first character whose code point is
/// not below the modulus.
pub fn encrypt_strict(plaintext: &str, key: &PublicKey) -> Result<Encrypted> {
    if let Some((index, character)) = plaintext
        .chars()
        .enumerate()
        .find(|(_, c)| u64::from(*c) >= key.n)
    {
        return Err(RsaError::OutOfRangeCharacter {
            index,
            character,
            modulus: key.n,
        });
    }
    Ok(encrypt(plaintext, key))
}

/// Decrypt each element as `value^d mod n` and read the result as a
/// character.
///
/// Either every element decrypts or the call fails: an element not below
/// `n`, or one that decrypts to something that is not a Unicode scalar
/// value, rejects the whole sequence.
pub fn decrypt(ciphertext: &CipherSequence, key: &PrivateKey) -> Result<Decrypted> {
    let mut plaintext = String::with_capacity(ciphertext.len());
    let mut trace = StepTrace::with_capacity(ciphertext.len());

    for (index, &value) in ciphertext.iter().enumerate() {
        if value >= key.n {
            return Err(RsaError::MalformedCiphertext {
                index,
                token: value.to_string(),
                reason: "is not below the modulus",
            });
        }

        let code = mod_pow(value, key.d, key.n);
        let character = u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| RsaError::MalformedCiphertext {
                index,
                token: value.to_string(),
                reason: "does not decode to a character",
            })?;

        trace.push(
            TraceInput::Ciphertext { value },
            format!("{}^{} mod {}", value, key.d, key.n),
            code,
            Some(character),
        );
        plaintext.push(character);
    }

    debug!(chars = ciphertext.len(), n = key.n, "Decrypted message");

    Ok(Decrypted { plaintext, trace })
}

/// Parse textual ciphertext elements, then decrypt them.
///
/// A malformed token fails the call before any decryption happens.
pub fn decrypt_tokens<S: AsRef<str>>(tokens: &[S], key: &PrivateKey) -> Result<Decrypted> {
    let ciphertext = CipherSequence::from_tokens(tokens)?;
    decrypt(&ciphertext, key)
}
