//! HTTP route handlers for the customer-record service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Redirect to the list page
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database ping)
//!
//! # JSON API
//! GET    /customers                 - List all customers
//! POST   /customers                 - Create a customer
//! GET    /customers/{id}            - Get one customer
//! PUT    /customers/{id}            - Update a customer (field subset)
//! DELETE /customers/{id}            - Delete a customer
//!
//! # Browser UI (server-rendered)
//! GET  /app/customers               - List page with the shared form
//!                                     (`?edit={id}` switches to edit mode)
//! POST /app/customers               - Create from the form
//! GET  /app/customers/{id}          - Detail page
//! POST /app/customers/{id}          - Update from the form
//! POST /app/customers/{id}/delete   - Delete (confirmed client-side)
//! ```

pub mod customers;
pub mod pages;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/{id}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::remove),
        )
}

/// Create the browser UI routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/app/customers", get(pages::index).post(pages::create))
        .route("/app/customers/{id}", get(pages::show).post(pages::update))
        .route("/app/customers/{id}/delete", post(pages::remove))
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/app/customers") }))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(api_routes())
        .merge(page_routes())
        .nest_service("/static", ServeDir::new("crates/server/static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
