//! Domain Layer
//!
//! Contains the core business logic, domain models, and gateway traits (ports).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::car_repository::{CarFilter, CarQuery, CarRepository};
pub use gateways::token_verifier::TokenVerifier;
pub use models::car::{Car, CarId, NewCar, Projection, MAX_CARS};
pub use models::principal::Principal;
