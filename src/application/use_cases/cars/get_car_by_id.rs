//! Get Car By ID Use Case
//!
//! Retrieves a single car with every stored field except `created_at`.

use std::sync::Arc;

use crate::domain::gateways::CarRepository;
use crate::domain::models::car::{Car, CarId, Projection};
use crate::shared::errors::UseCaseError;

/// Use case for getting a car by ID
pub struct GetCarByIdUseCase {
    car_repository: Arc<dyn CarRepository>,
}

impl GetCarByIdUseCase {
    /// Create a new GetCarByIdUseCase
    #[must_use]
    pub fn new(car_repository: Arc<dyn CarRepository>) -> Self {
        Self { car_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the car doesn't exist.
    /// Returns `UseCaseError::Upstream` if the store call fails.
    pub async fn execute(&self, id: &CarId) -> Result<Car, UseCaseError> {
        tracing::debug!(car_id = %id, "Getting car by ID");

        let car = self
            .car_repository
            .find_by_id(id, Projection::DETAIL)
            .await
            .map_err(|e| UseCaseError::upstream("Failed to fetch car", e))?
            .ok_or_else(|| {
                tracing::warn!(car_id = %id, "Car not found");
                UseCaseError::NotFound {
                    resource: "Car".to_string(),
                    id: id.to_string(),
                }
            })?;

        tracing::debug!(car_id = %id, "Car found");
        Ok(car)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::car_repository::MockCarRepository;
    use crate::shared::errors::RepositoryError;
    use serde_json::json;

    fn create_test_car() -> Car {
        let serde_json::Value::Object(fields) = json!({
            "brand": "Toyota",
            "price": 20000,
            "userEmail": "alice@example.com",
            "phone": "555-0100",
        }) else {
            unreachable!()
        };
        Car::restore(CarId::new(), fields)
    }

    #[tokio::test]
    async fn should_return_car_when_found() {
        let car = create_test_car();
        let id = *car.id();
        let stored = car.clone();

        let mut repo = MockCarRepository::new();
        repo.expect_find_by_id()
            .withf(move |requested, projection| *requested == id && *projection == Projection::DETAIL)
            .times(1)
            .returning(move |_, _| Ok(Some(stored.clone())));

        let use_case = GetCarByIdUseCase::new(Arc::new(repo));
        let result = use_case.execute(&id).await;

        assert_eq!(result.unwrap(), car);
    }

    #[tokio::test]
    async fn should_return_not_found_when_car_does_not_exist() {
        let mut repo = MockCarRepository::new();
        repo.expect_find_by_id().returning(|_, _| Ok(None));

        let use_case = GetCarByIdUseCase::new(Arc::new(repo));
        let result = use_case.execute(&CarId::new()).await;

        assert!(matches!(result.unwrap_err(), UseCaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn should_return_upstream_error_when_store_fails() {
        let mut repo = MockCarRepository::new();
        repo.expect_find_by_id()
            .returning(|_, _| Err(RepositoryError::Mapping("boom".to_string())));

        let use_case = GetCarByIdUseCase::new(Arc::new(repo));
        let result = use_case.execute(&CarId::new()).await;

        assert!(matches!(
            result.unwrap_err(),
            UseCaseError::Upstream { operation: "Failed to fetch car", .. }
        ));
    }
}
