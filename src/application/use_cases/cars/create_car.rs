//! Create Car Use Case
//!
//! Adds a listing owned by the authenticated principal, subject to the
//! per-user quota.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::gateways::{CarFilter, CarRepository};
use crate::domain::models::car::{CarId, NewCar};
use crate::domain::models::principal::Principal;
use crate::shared::errors::UseCaseError;

/// Use case for creating a new car listing
pub struct CreateCarUseCase {
    car_repository: Arc<dyn CarRepository>,
    max_cars: u64,
}

impl CreateCarUseCase {
    /// Create a new CreateCarUseCase allowing `max_cars` listings per user
    #[must_use]
    pub fn new(car_repository: Arc<dyn CarRepository>, max_cars: u64) -> Self {
        Self {
            car_repository,
            max_cars,
        }
    }

    /// Execute the use case
    ///
    /// The quota check and the insert are separate store calls, so concurrent
    /// creates by the same user can briefly exceed the cap.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::InvalidPayload` if the payload is not a JSON object.
    /// Returns `UseCaseError::QuotaExceeded` if the user already owns `max_cars` listings.
    /// Returns `UseCaseError::Upstream` if a store call fails.
    pub async fn execute(&self, principal: &Principal, payload: Value) -> Result<CarId, UseCaseError> {
        let Value::Object(fields) = payload else {
            return Err(UseCaseError::InvalidPayload(
                "car payload must be a JSON object".to_string(),
            ));
        };
        tracing::info!(user_email = %principal.email(), "Creating new car");

        let owned = self
            .car_repository
            .count(&CarFilter::owned_by(principal.email()))
            .await
            .map_err(|e| UseCaseError::upstream("Failed to add car", e))?;

        if owned >= self.max_cars {
            tracing::warn!(
                user_email = %principal.email(),
                owned,
                limit = self.max_cars,
                "Car quota exceeded"
            );
            return Err(UseCaseError::QuotaExceeded {
                limit: self.max_cars,
            });
        }

        let car = NewCar::new(fields, principal.email());
        let id = self
            .car_repository
            .insert(&car)
            .await
            .map_err(|e| UseCaseError::upstream("Failed to add car", e))?;

        tracing::info!(car_id = %id, user_email = %principal.email(), "Car created successfully");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::car_repository::MockCarRepository;
    use crate::domain::models::car::MAX_CARS;
    use crate::shared::errors::RepositoryError;
    use serde_json::json;

    fn principal() -> Principal {
        Principal::new("uid-1", "alice@example.com")
    }

    #[tokio::test]
    async fn should_create_car_when_under_quota() {
        let mut repo = MockCarRepository::new();
        repo.expect_count()
            .withf(|filter| filter.user_email.as_deref() == Some("alice@example.com"))
            .times(1)
            .returning(|_| Ok(MAX_CARS - 1));
        repo.expect_insert()
            .withf(|car| car.fields()["userEmail"] == json!("alice@example.com") && car.fields()["brand"] == json!("Toyota"))
            .times(1)
            .returning(|_| Ok(CarId::new()));

        let use_case = CreateCarUseCase::new(Arc::new(repo), MAX_CARS);
        let result = use_case
            .execute(&principal(), json!({"brand": "Toyota", "price": 20000}))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_ignore_client_supplied_owner() {
        let mut repo = MockCarRepository::new();
        repo.expect_count().returning(|_| Ok(0));
        repo.expect_insert()
            .withf(|car| car.fields()["userEmail"] == json!("alice@example.com"))
            .times(1)
            .returning(|_| Ok(CarId::new()));

        let use_case = CreateCarUseCase::new(Arc::new(repo), MAX_CARS);
        let result = use_case
            .execute(&principal(), json!({"brand": "Kia", "userEmail": "mallory@example.com"}))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_return_quota_exceeded_without_inserting() {
        let mut repo = MockCarRepository::new();
        repo.expect_count().returning(|_| Ok(MAX_CARS));
        repo.expect_insert().never();

        let use_case = CreateCarUseCase::new(Arc::new(repo), MAX_CARS);
        let result = use_case.execute(&principal(), json!({"brand": "Toyota"})).await;

        assert!(matches!(
            result.unwrap_err(),
            UseCaseError::QuotaExceeded { limit: MAX_CARS }
        ));
    }

    #[tokio::test]
    async fn should_honour_configured_quota() {
        let mut repo = MockCarRepository::new();
        repo.expect_count().returning(|_| Ok(1));
        repo.expect_insert().never();

        let use_case = CreateCarUseCase::new(Arc::new(repo), 1);
        let result = use_case.execute(&principal(), json!({"brand": "Toyota"})).await;

        assert!(matches!(result.unwrap_err(), UseCaseError::QuotaExceeded { limit: 1 }));
    }

    #[tokio::test]
    async fn should_reject_non_object_payload() {
        let mut repo = MockCarRepository::new();
        repo.expect_count().never();
        repo.expect_insert().never();

        let use_case = CreateCarUseCase::new(Arc::new(repo), MAX_CARS);
        let result = use_case.execute(&principal(), json!(["Toyota"])).await;

        assert!(matches!(result.unwrap_err(), UseCaseError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn should_not_insert_when_count_fails() {
        let mut repo = MockCarRepository::new();
        repo.expect_count()
            .returning(|_| Err(RepositoryError::Mapping("boom".to_string())));
        repo.expect_insert().never();

        let use_case = CreateCarUseCase::new(Arc::new(repo), MAX_CARS);
        let result = use_case.execute(&principal(), json!({"brand": "Toyota"})).await;

        assert!(matches!(
            result.unwrap_err(),
            UseCaseError::Upstream { operation: "Failed to add car", .. }
        ));
    }
}
