//! Firebase Authentication Adapter

pub mod service_account;
pub mod token_verifier;

pub use token_verifier::FirebaseTokenVerifier;
