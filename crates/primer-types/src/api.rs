use serde::{Deserialize, Serialize};

use primer_crypto::{PrivateKey, PublicKey, StepTrace};

// -- Keys --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeriveKeysRequest {
    pub p: u32,
    pub q: u32,
}

#[derive(Debug, Serialize)]
pub struct DeriveKeysResponse {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
    pub p: u64,
    pub q: u64,
    pub phi: u64,
    pub trace: StepTrace,
}

#[derive(Debug, Serialize)]
pub struct PrimeCheckResponse {
    pub n: u32,
    pub prime: bool,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncryptRequest {
    pub plaintext: String,
    pub public_key: PublicKey,
    /// Refuse characters whose code point is not below `n` instead of
    /// letting them wrap.
    #[serde(default)]
    pub strict: bool,
}

/// `ciphertext` is the space-separated text list a chat layer stores;
/// `values` carries the same integers as JSON numbers.
#[derive(Debug, Serialize)]
pub struct EncryptResponse {
    pub ciphertext: String,
    pub values: Vec<u64>,
    pub public_key: PublicKey,
    pub trace: StepTrace,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecryptRequest {
    /// Decimal integers separated by spaces and/or commas.
    pub ciphertext: String,
    pub private_key: PrivateKey,
}

#[derive(Debug, Serialize)]
pub struct DecryptResponse {
    pub plaintext: String,
    pub trace: StepTrace,
}

// -- Errors --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable failure kind, e.g. `invalid_prime`.
    pub error: String,
    pub message: String,
}
