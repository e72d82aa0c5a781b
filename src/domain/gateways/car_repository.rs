//! Car Repository Gateway
//!
//! Abstract trait defining the contract for car listing persistence.

use async_trait::async_trait;

use crate::domain::models::car::{Car, CarId, NewCar, Projection};
use crate::shared::errors::RepositoryError;

/// Conditions a stored car must satisfy. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarFilter {
    /// Case-insensitive substring of `brand`, matched literally
    pub brand_contains: Option<String>,
    /// Exact owner email
    pub user_email: Option<String>,
}

impl CarFilter {
    /// Filter matching every car owned by `email`
    #[must_use]
    pub fn owned_by(email: &str) -> Self {
        Self {
            user_email: Some(email.to_string()),
            ..Self::default()
        }
    }
}

/// List query. Results are always ordered newest first by `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarQuery {
    pub filter: CarFilter,
    pub projection: Projection,
    pub limit: Option<u32>,
}

/// Repository trait for Car persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Find cars matching the query, newest first
    async fn find(&self, query: &CarQuery) -> Result<Vec<Car>, RepositoryError>;

    /// Find a car by its ID
    async fn find_by_id(
        &self,
        id: &CarId,
        projection: Projection,
    ) -> Result<Option<Car>, RepositoryError>;

    /// Count cars matching the filter
    async fn count(&self, filter: &CarFilter) -> Result<u64, RepositoryError>;

    /// Insert a new car, returning the id assigned by the store
    async fn insert(&self, car: &NewCar) -> Result<CarId, RepositoryError>;

    /// Delete the car with `id` if it also matches `scope`; returns the deleted count
    async fn delete(&self, id: &CarId, scope: &CarFilter) -> Result<u64, RepositoryError>;
}
