//! Domain Models
//!
//! Pure domain entities and value objects representing business concepts.

pub mod car;
pub mod principal;

pub use car::{Car, CarId, NewCar, Projection, MAX_CARS};
pub use principal::Principal;
