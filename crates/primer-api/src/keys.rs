use axum::{Json, extract::Path};
use tracing::info;

use primer_crypto::is_prime;
use primer_types::api::{DeriveKeysRequest, DeriveKeysResponse, PrimeCheckResponse};

use crate::error::ApiError;

/// POST /keys
pub async fn derive_keys(
    Json(req): Json<DeriveKeysRequest>,
) -> Result<Json<DeriveKeysResponse>, ApiError> {
    let derived = primer_crypto::derive_keys(req.p, req.q)?;
    let keys = derived.keys;

    info!(n = keys.n(), e = keys.e(), "Key pair derived");

    Ok(Json(DeriveKeysResponse {
        public_key: keys.public_key(),
        private_key: keys.private_key(),
        p: keys.p(),
        q: keys.q(),
        phi: keys.phi(),
        trace: derived.trace,
    }))
}

/// GET /primes/{n}
///
/// Lets a key form validate each prime as it is typed. Only `u32` values are
/// accepted, the same range `/keys` takes, which keeps trial division short.
pub async fn check_prime(Path(n): Path<u32>) -> Json<PrimeCheckResponse> {
    Json(PrimeCheckResponse {
        n,
        prime: is_prime(u64::from(n)),
    })
}
