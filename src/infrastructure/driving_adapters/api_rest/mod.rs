//! REST API Module
//!
//! Contains HTTP handlers, DTOs, and middleware for the REST API.

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::use_cases::cars::{
    CreateCarUseCase, DeleteCarUseCase, GetCarByIdUseCase, ListCarsUseCase,
};
use crate::domain::gateways::{CarRepository, TokenVerifier};
use crate::infrastructure::driven_adapters::config::CatalogConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub token_verifier: Arc<dyn TokenVerifier>,
    pub list_cars_use_case: Arc<ListCarsUseCase>,
    pub get_car_by_id_use_case: Arc<GetCarByIdUseCase>,
    pub create_car_use_case: Arc<CreateCarUseCase>,
    pub delete_car_use_case: Arc<DeleteCarUseCase>,
}

impl AppState {
    /// Wire the use cases around the given repository and verifier
    #[must_use]
    pub fn new(
        car_repository: Arc<dyn CarRepository>,
        token_verifier: Arc<dyn TokenVerifier>,
        catalog: &CatalogConfig,
    ) -> Self {
        Self {
            token_verifier,
            list_cars_use_case: Arc::new(ListCarsUseCase::new(car_repository.clone())),
            get_car_by_id_use_case: Arc::new(GetCarByIdUseCase::new(car_repository.clone())),
            create_car_use_case: Arc::new(CreateCarUseCase::new(
                car_repository.clone(),
                catalog.max_cars_per_user,
            )),
            delete_car_use_case: Arc::new(DeleteCarUseCase::new(
                car_repository,
                catalog.restrict_delete_to_owner,
            )),
        }
    }
}

/// Build the full HTTP router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::liveness))
        .nest("/cars", handlers::cars::router())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
