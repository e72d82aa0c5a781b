//! Common test utilities for e2e tests
//!
//! Provides an in-memory car store and a static token verifier so the real
//! router can be exercised without MongoDB or Firebase.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tower::util::ServiceExt;

use car_xpress_api::domain::gateways::{CarFilter, CarQuery, CarRepository, TokenVerifier};
use car_xpress_api::domain::models::car::{fields, Car, CarId, NewCar, Projection};
use car_xpress_api::domain::models::principal::Principal;
use car_xpress_api::infrastructure::driven_adapters::config::CatalogConfig;
use car_xpress_api::infrastructure::driving_adapters::api_rest::{build_router, AppState};
use car_xpress_api::shared::errors::{RepositoryError, VerifyError};

pub const ALICE_TOKEN: &str = "alice-token";
pub const ALICE_EMAIL: &str = "alice@example.com";
pub const BOB_TOKEN: &str = "bob-token";
pub const BOB_EMAIL: &str = "bob@example.com";

#[derive(Debug, Clone)]
struct StoredCar {
    id: CarId,
    fields: Map<String, Value>,
    created_at: DateTime<Utc>,
}

impl StoredCar {
    fn matches(&self, filter: &CarFilter) -> bool {
        let brand_matches = filter.brand_contains.as_ref().is_none_or(|term| {
            self.fields
                .get(fields::BRAND)
                .and_then(Value::as_str)
                .is_some_and(|brand| brand.to_lowercase().contains(&term.to_lowercase()))
        });
        let owner_matches = filter.user_email.as_ref().is_none_or(|email| {
            self.fields.get(fields::USER_EMAIL).and_then(Value::as_str) == Some(email.as_str())
        });
        brand_matches && owner_matches
    }

    fn project(&self, projection: Projection) -> Car {
        let mut fields = self.fields.clone();
        projection.apply(&mut fields);
        Car::restore(self.id, fields)
    }
}

/// In-memory CarRepository with the same filter, projection and ordering rules
#[derive(Default)]
pub struct InMemoryCarRepository {
    cars: Mutex<Vec<StoredCar>>,
}

impl InMemoryCarRepository {
    pub fn len(&self) -> usize {
        self.cars.lock().unwrap().len()
    }

    pub fn count_owned_by(&self, email: &str) -> usize {
        let filter = CarFilter::owned_by(email);
        self.cars
            .lock()
            .unwrap()
            .iter()
            .filter(|car| car.matches(&filter))
            .count()
    }

    /// Raw stored fields, including private ones
    pub fn stored_fields(&self, id: &str) -> Option<Map<String, Value>> {
        self.cars
            .lock()
            .unwrap()
            .iter()
            .find(|car| car.id.to_hex() == id)
            .map(|car| car.fields.clone())
    }
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn find(&self, query: &CarQuery) -> Result<Vec<Car>, RepositoryError> {
        let cars = self.cars.lock().unwrap();
        let mut matching: Vec<&StoredCar> = cars
            .iter()
            .rev()
            .filter(|car| car.matches(&query.filter))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);
        Ok(matching
            .into_iter()
            .take(limit)
            .map(|car| car.project(query.projection))
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &CarId,
        projection: Projection,
    ) -> Result<Option<Car>, RepositoryError> {
        let cars = self.cars.lock().unwrap();
        Ok(cars
            .iter()
            .find(|car| car.id == *id)
            .map(|car| car.project(projection)))
    }

    async fn count(&self, filter: &CarFilter) -> Result<u64, RepositoryError> {
        let cars = self.cars.lock().unwrap();
        Ok(cars.iter().filter(|car| car.matches(filter)).count() as u64)
    }

    async fn insert(&self, car: &NewCar) -> Result<CarId, RepositoryError> {
        let id = CarId::new();
        self.cars.lock().unwrap().push(StoredCar {
            id,
            fields: car.fields().clone(),
            created_at: car.created_at(),
        });
        Ok(id)
    }

    async fn delete(&self, id: &CarId, scope: &CarFilter) -> Result<u64, RepositoryError> {
        let mut cars = self.cars.lock().unwrap();
        let before = cars.len();
        cars.retain(|car| !(car.id == *id && car.matches(scope)));
        Ok((before - cars.len()) as u64)
    }
}

/// Repository whose every call fails, for upstream error paths
pub struct FailingCarRepository;

#[async_trait]
impl CarRepository for FailingCarRepository {
    async fn find(&self, _query: &CarQuery) -> Result<Vec<Car>, RepositoryError> {
        Err(RepositoryError::Mapping("connection reset by peer".to_string()))
    }

    async fn find_by_id(
        &self,
        _id: &CarId,
        _projection: Projection,
    ) -> Result<Option<Car>, RepositoryError> {
        Err(RepositoryError::Mapping("connection reset by peer".to_string()))
    }

    async fn count(&self, _filter: &CarFilter) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Mapping("connection reset by peer".to_string()))
    }

    async fn insert(&self, _car: &NewCar) -> Result<CarId, RepositoryError> {
        Err(RepositoryError::Mapping("connection reset by peer".to_string()))
    }

    async fn delete(&self, _id: &CarId, _scope: &CarFilter) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Mapping("connection reset by peer".to_string()))
    }
}

/// Token verifier accepting a fixed set of tokens
pub struct StaticTokenVerifier {
    principals: HashMap<String, Principal>,
}

impl Default for StaticTokenVerifier {
    fn default() -> Self {
        let principals = HashMap::from([
            (ALICE_TOKEN.to_string(), Principal::new("uid-alice", ALICE_EMAIL)),
            (BOB_TOKEN.to_string(), Principal::new("uid-bob", BOB_EMAIL)),
        ]);
        Self { principals }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError> {
        self.principals.get(token).cloned().ok_or(VerifyError::Rejected("unknown token"))
    }
}

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryCarRepository>,
}

impl TestApp {
    /// Create a test application with an empty store and default catalog rules
    pub fn new() -> Self {
        Self::with_catalog(CatalogConfig::default())
    }

    pub fn with_catalog(catalog: CatalogConfig) -> Self {
        let repository = Arc::new(InMemoryCarRepository::default());
        let state = AppState::new(
            repository.clone(),
            Arc::new(StaticTokenVerifier::default()),
            &catalog,
        );

        Self {
            router: build_router(state),
            repository,
        }
    }

    /// Router backed by a store that always fails
    pub fn failing_router() -> Router {
        let state = AppState::new(
            Arc::new(FailingCarRepository),
            Arc::new(StaticTokenVerifier::default()),
            &CatalogConfig::default(),
        );
        build_router(state)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
        send(&self.router, Method::POST, uri, token, Some(body.to_string())).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        send(&self.router, Method::DELETE, uri, token, None).await
    }

    /// Create a car as the owner of `token`, returning its id
    pub async fn create_car(&self, token: &str, body: Value) -> String {
        let (status, ack) = self.post("/cars", Some(token), &body).await;
        assert_eq!(status, StatusCode::OK, "create failed: {ack}");
        ack["insertedId"].as_str().unwrap().to_string()
    }
}

/// Send a request and decode the body as JSON (or a JSON string for text)
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, value)
}
