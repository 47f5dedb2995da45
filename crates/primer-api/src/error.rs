use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::debug;

use primer_crypto::RsaError;
use primer_types::api::ErrorResponse;

/// Errors returned by handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The engine refused the input.
    #[error(transparent)]
    Rsa(#[from] RsaError),

    /// A client-supplied key cannot be used at all.
    #[error("invalid key: {reason}")]
    InvalidKey { reason: &'static str },

    #[error("message has {chars} characters, the limit is {limit}")]
    MessageTooLong { chars: usize, limit: usize },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Rsa(_) | Self::InvalidKey { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MessageTooLong { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Rsa(err) => err.kind(),
            Self::InvalidKey { .. } => "invalid_key",
            Self::MessageTooLong { .. } => "message_too_long",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(kind = self.kind(), "Rejected request: {}", self);
        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
