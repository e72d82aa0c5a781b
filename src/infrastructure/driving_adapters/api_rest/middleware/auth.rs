//! Bearer Token Authentication
//!
//! Extracts the bearer token from the `Authorization` header and verifies it
//! with the configured identity provider. Every failure becomes the same 401.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::domain::gateways::TokenVerifier;
use crate::domain::models::principal::Principal;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Token part of an `Authorization` header value (`Bearer <token>`)
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    header.split(' ').nth(1).filter(|token| !token.is_empty())
}

/// Turn a raw `Authorization` header value into a principal
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` when the header is missing, has no token
/// part, or the identity provider rejects the token.
pub async fn authenticate(
    verifier: &dyn TokenVerifier,
    header: Option<&str>,
) -> Result<Principal, ApiError> {
    let Some(token) = header.and_then(bearer_token) else {
        tracing::debug!("Missing or malformed Authorization header");
        return Err(ApiError::Unauthorized);
    };

    verifier.verify(token).await.map_err(|err| {
        // Don't expose token validation details to the caller
        tracing::debug!(error = %err, "Token verification failed");
        ApiError::Unauthorized
    })
}

/// Authenticated principal extractor
pub struct Authenticated(pub Principal);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        authenticate(state.token_verifier.as_ref(), header)
            .await
            .map(Self)
    }
}
