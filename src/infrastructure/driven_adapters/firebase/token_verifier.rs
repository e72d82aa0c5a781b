//! Firebase ID Token Verifier
//!
//! Verifies Firebase Authentication ID tokens: RS256 JWTs signed by Google's
//! secure-token service. Signing keys are fetched as a JWKS, cached for a TTL
//! and refreshed once when a token names an unknown key id. Besides the
//! signature, `iss`, `aud` and `exp`, a token must have been issued (and its
//! user authenticated) no later than now plus the configured leeway.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{decode, decode_header, get_current_timestamp, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::service_account::project_id_from_service_key;
use crate::domain::gateways::TokenVerifier;
use crate::domain::models::principal::Principal;
use crate::infrastructure::driven_adapters::config::FirebaseConfig;
use crate::shared::errors::VerifyError;

/// Claims read from a verified Firebase ID token
#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    iat: Option<u64>,
    #[serde(default)]
    auth_time: Option<u64>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedJwks {
    jwks: JwkSet,
    expires_at: Instant,
}

/// Firebase implementation of TokenVerifier
pub struct FirebaseTokenVerifier {
    client: reqwest::Client,
    project_id: String,
    jwks_url: String,
    jwks_ttl: Duration,
    leeway_secs: u64,
    cache: RwLock<Option<CachedJwks>>,
}

impl FirebaseTokenVerifier {
    /// Create a verifier for tokens issued to `project_id`
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        jwks_url: impl Into<String>,
        jwks_ttl: Duration,
        leeway_secs: u64,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            project_id: project_id.into(),
            jwks_url: jwks_url.into(),
            jwks_ttl,
            leeway_secs,
            cache: RwLock::new(None),
        }
    }

    /// Build a verifier from configuration.
    ///
    /// An explicit `project_id` wins; otherwise it is read from the service key.
    ///
    /// # Errors
    ///
    /// Fails when neither a project id nor a readable service key is configured.
    pub fn from_config(config: &FirebaseConfig) -> anyhow::Result<Self> {
        let project_id = match (&config.project_id, &config.service_key) {
            (Some(project_id), _) => project_id.clone(),
            (None, Some(service_key)) => project_id_from_service_key(service_key)?,
            (None, None) => anyhow::bail!(
                "firebase.project_id or firebase.service_key (FIREBASE_SERVICE_KEY) must be set"
            ),
        };

        Ok(Self::new(
            project_id,
            config.jwks_url.clone(),
            Duration::from_secs(config.jwks_ttl_secs),
            config.leeway_secs,
        ))
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Expected `iss` claim
    #[must_use]
    pub fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }

    async fn signing_key(&self, kid: &str) -> Result<DecodingKey, VerifyError> {
        if let Some(jwk) = self.cached_key(kid).await {
            return Ok(DecodingKey::from_jwk(&jwk)?);
        }

        // Unknown kid or expired cache: Google rotates keys regularly.
        let jwks = self.refresh_jwks().await?;
        let jwk = jwks.find(kid).ok_or(VerifyError::KeyNotFound)?;
        Ok(DecodingKey::from_jwk(jwk)?)
    }

    async fn cached_key(&self, kid: &str) -> Option<Jwk> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|entry| entry.expires_at > Instant::now())
            .and_then(|entry| entry.jwks.find(kid).cloned())
    }

    async fn refresh_jwks(&self) -> Result<JwkSet, VerifyError> {
        tracing::debug!(jwks_url = %self.jwks_url, "Fetching Firebase signing keys");
        let jwks: JwkSet = self
            .client
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        *self.cache.write().await = Some(CachedJwks {
            jwks: jwks.clone(),
            expires_at: Instant::now() + self.jwks_ttl,
        });
        Ok(jwks)
    }
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError> {
        let header = decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(VerifyError::UnsupportedAlgorithm);
        }
        let kid = header.kid.as_deref().ok_or(VerifyError::MissingKeyId)?;
        let key = self.signing_key(kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.issuer()]);
        validation.set_audience(&[self.project_id.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = self.leeway_secs;

        let claims = decode::<FirebaseClaims>(token, &key, &validation)?.claims;
        if claims.sub.is_empty() {
            return Err(VerifyError::MissingClaim("sub"));
        }

        let latest = get_current_timestamp().saturating_add(self.leeway_secs);
        let issued_at = claims.iat.ok_or(VerifyError::MissingClaim("iat"))?;
        if issued_at > latest {
            return Err(VerifyError::Rejected("issued in the future"));
        }
        if claims.auth_time.is_some_and(|auth_time| auth_time > latest) {
            return Err(VerifyError::Rejected("authenticated in the future"));
        }
        let email = claims
            .email
            .filter(|email| !email.is_empty())
            .ok_or(VerifyError::MissingClaim("email"))?;

        Ok(Principal::new(claims.sub, email))
    }
}
