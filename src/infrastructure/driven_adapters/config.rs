//! Application Configuration
//!
//! Loads configuration from files and environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::models::car::MAX_CARS;

/// Google endpoint publishing the keys that sign Firebase ID tokens
pub const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub collection: String,
}

/// Firebase Authentication configuration
#[derive(Clone, Deserialize)]
pub struct FirebaseConfig {
    /// Base64-encoded service account JSON
    #[serde(default)]
    pub service_key: Option<String>,
    /// Takes precedence over the project id in the service account
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_jwks_url")]
    pub jwks_url: String,
    #[serde(default = "default_jwks_ttl_secs")]
    pub jwks_ttl_secs: u64,
    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("service_key", &self.service_key.as_ref().map(|_| "<redacted>"))
            .field("project_id", &self.project_id)
            .field("jwks_url", &self.jwks_url)
            .field("jwks_ttl_secs", &self.jwks_ttl_secs)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

/// Catalog rules
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_max_cars")]
    pub max_cars_per_user: u64,
    /// Only let owners delete their own listings
    #[serde(default)]
    pub restrict_delete_to_owner: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_cars_per_user: MAX_CARS,
            restrict_delete_to_owner: false,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_jwks_url() -> String {
    FIREBASE_JWKS_URL.to_string()
}

fn default_jwks_ttl_secs() -> u64 {
    3600
}

fn default_leeway_secs() -> u64 {
    60
}

fn default_max_cars() -> u64 {
    MAX_CARS
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__SERVER__PORT)
            .add_source(Environment::with_prefix("APP").separator("__"))
            // Plain variables used by common hosting platforms
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("database.uri", std::env::var("MONGODB_URI").ok())?
            .set_override_option("firebase.service_key", std::env::var("FIREBASE_SERVICE_KEY").ok())?
            .build()?
            .try_deserialize()
    }
}
