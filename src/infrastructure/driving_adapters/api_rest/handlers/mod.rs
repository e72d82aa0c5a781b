//! HTTP Handlers

pub mod cars;
pub mod health;
