use crm_core_api::domain::Identity;
use crm_core_api::error::{ApiError, ApiResult};
use crm_core_api::service::TokenVerifier;

pub const NO_TOKEN: &str = "No token provided";
pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Token part of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.split_whitespace().nth(1)
}

/// Resolves the caller's identity from the raw `Authorization` header value.
pub fn authenticate(verifier: &dyn TokenVerifier, header: Option<&str>) -> ApiResult<Identity> {
    let token = bearer_token(header).ok_or_else(|| ApiError::Unauthenticated(NO_TOKEN.to_string()))?;
    verifier.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "token verification failed");
        ApiError::Unauthenticated(INVALID_TOKEN.to_string())
    })
}
