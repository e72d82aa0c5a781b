//! Car DTOs
//!
//! Data transfer objects for car API endpoints. Car bodies themselves stay
//! free-form JSON; only the query string and acknowledgments are typed.

use serde::{Deserialize, Serialize};

use crate::domain::models::car::CarId;

/// Query string for `GET /cars`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCarsQuery {
    pub search: Option<String>,
    /// Kept raw; anything but a positive integer means "no limit"
    pub limit: Option<String>,
}

/// Acknowledgment returned after inserting a car
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAckDto {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl From<CarId> for InsertAckDto {
    fn from(id: CarId) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id.to_hex(),
        }
    }
}

/// Acknowledgment returned after a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAckDto {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<u64> for DeleteAckDto {
    fn from(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}
