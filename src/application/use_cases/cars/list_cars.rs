//! List Cars Use Case
//!
//! Lists cars newest first, optionally filtered by brand and capped in size.

use std::sync::Arc;

use crate::domain::gateways::{CarFilter, CarQuery, CarRepository};
use crate::domain::models::car::{Car, Projection};
use crate::shared::errors::UseCaseError;

/// Parse the raw `limit` query value.
///
/// Only a positive integer caps the result; anything else means no limit.
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|limit| *limit > 0)
}

/// Use case for listing cars
pub struct ListCarsUseCase {
    car_repository: Arc<dyn CarRepository>,
}

impl ListCarsUseCase {
    /// Create a new ListCarsUseCase
    #[must_use]
    pub fn new(car_repository: Arc<dyn CarRepository>) -> Self {
        Self { car_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Upstream` if the store call fails.
    pub async fn execute(&self, search: Option<&str>, limit: Option<&str>) -> Result<Vec<Car>, UseCaseError> {
        let query = CarQuery {
            filter: CarFilter {
                brand_contains: search.filter(|term| !term.is_empty()).map(str::to_string),
                user_email: None,
            },
            projection: Projection::LISTING,
            limit: parse_limit(limit),
        };
        tracing::debug!(search = ?query.filter.brand_contains, limit = ?query.limit, "Listing cars");

        let cars = self
            .car_repository
            .find(&query)
            .await
            .map_err(|e| UseCaseError::upstream("Failed to fetch cars", e))?;

        tracing::debug!(count = cars.len(), "Found cars");
        Ok(cars)
    }
}
