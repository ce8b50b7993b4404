//! Customer JSON API route handlers.
//!
//! Each handler performs exactly one record-store operation and maps the
//! result to a status code; no request touches more than one document.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use clientele_core::{Customer, CustomerDraft, CustomerId, CustomerUpdate};

use crate::db::CustomerRepository;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Confirmation body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// List all customers.
///
/// `GET /customers`
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    let customers = CustomerRepository::new(state.pool())
        .list()
        .await
        .map_err(ApiError::internal("Failed to fetch customers"))?;

    Ok(Json(customers))
}

/// Create a new customer.
///
/// `POST /customers` - body carries the customer fields minus `id` and
/// `createdAt`, which the store assigns.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Customer>)> {
    let draft: CustomerDraft =
        serde_json::from_value(body).map_err(|e| ApiError::BadPayload(e.to_string()))?;
    let new = draft.validate()?;

    let customer = CustomerRepository::new(state.pool())
        .create(&new)
        .await
        .map_err(ApiError::internal("Failed to create customer"))?;

    tracing::info!(customer_id = %customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Get a customer by id.
///
/// `GET /customers/{id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>> {
    let id: CustomerId = id.parse()?;

    let customer = CustomerRepository::new(state.pool())
        .get(id)
        .await
        .map_err(ApiError::internal("Failed to fetch customer"))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(customer))
}

/// Update a customer with any subset of the allowed fields.
///
/// `PUT /customers/{id}` - fields outside the allowed set are rejected.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Customer>> {
    let id: CustomerId = id.parse()?;
    let changes: CustomerUpdate =
        serde_json::from_value(body).map_err(|e| ApiError::BadPayload(e.to_string()))?;
    let changes = changes.validated()?;

    let customer = CustomerRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map_err(ApiError::internal("Failed to update customer"))?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(customer_id = %customer.id, "Customer updated");
    Ok(Json(customer))
}

/// Delete a customer by id.
///
/// `DELETE /customers/{id}`
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id: CustomerId = id.parse()?;

    let deleted = CustomerRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(ApiError::internal("Failed to delete customer"))?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    tracing::info!(customer_id = %id, "Customer deleted");
    Ok(Json(DeleteResponse {
        message: "Customer deleted successfully".to_owned(),
    }))
}
