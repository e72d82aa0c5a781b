//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - MongoDB car repository
//! - Firebase token verifier
//! - Configuration

pub mod car_repository;
pub mod config;
pub mod database;
pub mod firebase;

pub use car_repository::MongoCarRepository;
pub use config::AppConfig;
pub use firebase::FirebaseTokenVerifier;
