//! Car Handlers
//!
//! HTTP handlers for the car catalog.
//! Reads are public; creating and deleting require a bearer token.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::Value;

use crate::domain::models::car::{Car, CarId};
use crate::infrastructure::driving_adapters::api_rest::dto::car::{
    DeleteAckDto, InsertAckDto, ListCarsQuery,
};
use crate::infrastructure::driving_adapters::api_rest::middleware::auth::Authenticated;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for car endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars))
        .route("/", post(create_car))
        .route("/{id}", get(get_car_by_id))
        .route("/{id}", delete(delete_car))
}

/// GET /cars - List cars, newest first
///
/// # Query
///
/// * `search` - case-insensitive substring of `brand`
/// * `limit` - maximum number of cars
///
/// # Responses
///
/// * 200 OK - Cars without private fields
/// * 500 Internal Server Error - Store failure or unreadable query string
#[axum::debug_handler]
async fn list_cars(
    State(state): State<AppState>,
    query: Result<Query<ListCarsQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Query(query) =
        query.map_err(|rejection| ApiError::failed("Failed to fetch cars", rejection.body_text()))?;

    let cars = state
        .list_cars_use_case
        .execute(query.search.as_deref(), query.limit.as_deref())
        .await?;

    Ok(Json(cars.into_iter().map(Car::into_json).collect()))
}

/// GET /cars/:id - Get a car by ID
///
/// # Responses
///
/// * 200 OK - Car found
/// * 404 Not Found - Car does not exist or the id is malformed
/// * 500 Internal Server Error - Store failure
#[axum::debug_handler]
async fn get_car_by_id(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let car_id = CarId::try_from(id.as_str())?;

    let car = state.get_car_by_id_use_case.execute(&car_id).await?;

    Ok(Json(car.into_json()))
}

/// POST /cars - Add a car owned by the caller
///
/// # Authentication
///
/// Requires a valid bearer token; the token's email becomes `userEmail`.
///
/// # Responses
///
/// * 200 OK - Insert acknowledgment
/// * 400 Bad Request - Body is not a JSON object
/// * 401 Unauthorized - Missing or invalid token
/// * 429 Too Many Requests - Caller already lists the maximum number of cars
/// * 500 Internal Server Error - Store failure
#[axum::debug_handler]
async fn create_car(
    Authenticated(principal): Authenticated,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InsertAckDto>, ApiError> {
    let Json(payload) = payload?;

    let id = state.create_car_use_case.execute(&principal, payload).await?;

    Ok(Json(InsertAckDto::from(id)))
}

/// DELETE /cars/:id - Delete a car
///
/// # Authentication
///
/// Requires a valid bearer token.
///
/// # Responses
///
/// * 200 OK - Delete acknowledgment (`deletedCount` 0 when nothing matched)
/// * 401 Unauthorized - Missing or invalid token
/// * 500 Internal Server Error - Store failure or malformed id
#[axum::debug_handler]
async fn delete_car(
    Authenticated(principal): Authenticated,
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteAckDto>, ApiError> {
    let Path(id) =
        id.map_err(|rejection| ApiError::failed("Failed to delete car", rejection.body_text()))?;
    let car_id =
        CarId::try_from(id.as_str()).map_err(|err| ApiError::failed("Failed to delete car", err))?;

    let deleted = state.delete_car_use_case.execute(&principal, &car_id).await?;

    Ok(Json(DeleteAckDto::from(deleted)))
}
