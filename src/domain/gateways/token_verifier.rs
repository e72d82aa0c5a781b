//! Token Verifier Gateway
//!
//! Contract for the external identity provider that vouches for bearer tokens.

use async_trait::async_trait;

use crate::domain::models::principal::Principal;
use crate::shared::errors::VerifyError;

/// Verifies raw bearer tokens issued by the identity provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` and return the principal it identifies
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError>;
}
