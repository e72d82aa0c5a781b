//! Delete Car Use Case
//!
//! Removes a listing. Any authenticated user may delete any listing unless
//! owner-only deletes are enabled.

use std::sync::Arc;

use crate::domain::gateways::{CarFilter, CarRepository};
use crate::domain::models::car::CarId;
use crate::domain::models::principal::Principal;
use crate::shared::errors::UseCaseError;

/// Use case for deleting a car
pub struct DeleteCarUseCase {
    car_repository: Arc<dyn CarRepository>,
    restrict_to_owner: bool,
}

impl DeleteCarUseCase {
    /// Create a new DeleteCarUseCase
    #[must_use]
    pub fn new(car_repository: Arc<dyn CarRepository>, restrict_to_owner: bool) -> Self {
        Self {
            car_repository,
            restrict_to_owner,
        }
    }

    /// Execute the use case, returning the number of deleted listings (0 or 1)
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Upstream` if the store call fails.
    pub async fn execute(&self, principal: &Principal, id: &CarId) -> Result<u64, UseCaseError> {
        tracing::info!(car_id = %id, user_email = %principal.email(), "Deleting car");

        let scope = if self.restrict_to_owner {
            CarFilter::owned_by(principal.email())
        } else {
            CarFilter::default()
        };

        let deleted = self
            .car_repository
            .delete(id, &scope)
            .await
            .map_err(|e| UseCaseError::upstream("Failed to delete car", e))?;

        if deleted == 0 {
            tracing::warn!(car_id = %id, "No car deleted");
        } else {
            tracing::info!(car_id = %id, "Car deleted successfully");
        }
        Ok(deleted)
    }
}
