//! Car Xpress API
//!
//! A Rust-based microservice for listing cars for sale, following
//! Clean/Hexagonal Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
