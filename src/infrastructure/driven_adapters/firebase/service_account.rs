//! Firebase Service Account Credentials
//!
//! The service account arrives as a base64-encoded JSON blob. Only the
//! project id is needed to verify ID tokens; the decoded blob is wiped as soon
//! as it has been read.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use zeroize::Zeroizing;

/// Errors while reading the service account blob
#[derive(Debug, thiserror::Error)]
pub enum ServiceAccountError {
    #[error("service key is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("service key is not a service account document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ServiceAccount {
    project_id: String,
}

/// Extract the Firebase project id from a base64-encoded service account
pub fn project_id_from_service_key(encoded: &str) -> Result<String, ServiceAccountError> {
    let decoded = Zeroizing::new(STANDARD.decode(encoded.trim())?);
    let account: ServiceAccount = serde_json::from_slice(&decoded)?;
    Ok(account.project_id)
}
