use axum::{Json, extract::State};

use primer_crypto::CipherSequence;
use primer_types::api::{DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /encrypt
pub async fn encrypt(
    State(state): State<AppState>,
    Json(req): Json<EncryptRequest>,
) -> Result<Json<EncryptResponse>, ApiError> {
    check_length(req.plaintext.chars().count(), state.max_message_chars)?;
    if req.public_key.n == 0 {
        return Err(ApiError::InvalidKey { reason: "modulus must be non-zero" });
    }

    let encrypted = if req.strict {
        primer_crypto::encrypt_strict(&req.plaintext, &req.public_key)?
    } else {
        primer_crypto::encrypt(&req.plaintext, &req.public_key)
    };

    Ok(Json(EncryptResponse {
        ciphertext: encrypted.ciphertext.to_string(),
        values: encrypted.ciphertext.into_inner(),
        public_key: req.public_key,
        trace: encrypted.trace,
    }))
}

/// POST /decrypt
pub async fn decrypt(
    State(state): State<AppState>,
    Json(req): Json<DecryptRequest>,
) -> Result<Json<DecryptResponse>, ApiError> {
    if req.private_key.n == 0 {
        return Err(ApiError::InvalidKey { reason: "modulus must be non-zero" });
    }
    // Bound the work before any token is parsed.
    check_length(CipherSequence::count_elements(&req.ciphertext), state.max_message_chars)?;
    let ciphertext: CipherSequence = req.ciphertext.parse()?;

    let decrypted = primer_crypto::decrypt(&ciphertext, &req.private_key)?;

    Ok(Json(DecryptResponse {
        plaintext: decrypted.plaintext,
        trace: decrypted.trace,
    }))
}

fn check_length(chars: usize, limit: usize) -> Result<(), ApiError> {
    if chars > limit {
        return Err(ApiError::MessageTooLong { chars, limit });
    }
    Ok(())
}
