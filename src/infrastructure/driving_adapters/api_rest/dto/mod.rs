//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API.

pub mod car;

pub use car::{DeleteAckDto, InsertAckDto, ListCarsQuery};
