//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driven adapters in the infrastructure layer.

pub mod car_repository;
pub mod token_verifier;

pub use car_repository::{CarFilter, CarQuery, CarRepository};
pub use token_verifier::TokenVerifier;
