//! API tests exercising the full router in-process against an in-memory
//! `SQLite` database.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use clientele_server::config::ServerConfig;
use clientele_server::state::AppState;
use clientele_server::{db, routes};

/// Build the application over a fresh in-memory database.
///
/// A single-connection pool keeps the in-memory database alive across
/// requests; separate connections would each see their own empty store.
async fn test_app() -> Router {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory pool");
    db::MIGRATOR.run(&pool).await.expect("Failed to migrate");

    let config = ServerConfig {
        database_url: "sqlite::memory:".to_owned(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
    };

    routes::app(AppState::new(config, pool))
}

async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn request_text(app: &Router, method: &str, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

fn ada() -> Value {
    json!({
        "name": "Ada",
        "dateOfBirth": "1990-01-01",
        "memberNumber": 42,
        "interests": "chess, code"
    })
}

async fn create_ada(app: &Router) -> Value {
    let (status, body) = request_json(app, "POST", "/customers", Some(ada())).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn create_returns_document_with_generated_id() {
    let app = test_app().await;
    let body = create_ada(&app).await;

    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["dateOfBirth"], "1990-01-01");
    assert_eq!(body["memberNumber"], 42);
    assert_eq!(body["interests"], "chess, code");
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn get_returns_the_created_fields() {
    let app = test_app().await;
    let created = create_ada(&app).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = request_json(&app, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn create_accepts_member_number_as_string() {
    let app = test_app().await;
    let mut payload = ada();
    payload["memberNumber"] = json!("42");

    let (status, body) = request_json(&app, "POST", "/customers", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["memberNumber"], 42);
}

#[tokio::test]
async fn create_missing_required_field_is_rejected() {
    let app = test_app().await;
    let (status, body) =
        request_json(&app, "POST", "/customers", Some(json!({"name": "Ada"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().unwrap().contains("dateOfBirth"),
        "error should name the missing field: {body}"
    );
}

#[tokio::test]
async fn create_blank_name_is_rejected() {
    let app = test_app().await;
    let mut payload = ada();
    payload["name"] = json!("   ");

    let (status, body) = request_json(&app, "POST", "/customers", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let app = test_app().await;
    let created = create_ada(&app).await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = request_json(
        &app,
        "PUT",
        &format!("/customers/{id}"),
        Some(json!({"memberNumber": 99})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["memberNumber"], 99);
    assert_eq!(updated["name"], "Ada");
    assert_eq!(updated["interests"], "chess, code");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    // And the change is visible on a fresh read.
    let (_, fetched) = request_json(&app, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_rejects_fields_outside_the_allowed_set() {
    let app = test_app().await;
    let created = create_ada(&app).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = request_json(
        &app,
        "PUT",
        &format!("/customers/{id}"),
        Some(json!({"name": "Eve", "isAdmin": true})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The record is untouched.
    let (_, fetched) = request_json(&app, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(fetched["name"], "Ada");
}

#[tokio::test]
async fn update_missing_customer_is_not_found() {
    let app = test_app().await;

    let (status, body) = request_json(
        &app,
        "PUT",
        "/customers/00000000-0000-4000-8000-000000000000",
        Some(json!({"name": "Nobody"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Customer not found");
}

#[tokio::test]
async fn delete_then_get_returns_not_found() {
    let app = test_app().await;
    let created = create_ada(&app).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = request_json(&app, "DELETE", &format!("/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer deleted successfully");

    let (status, body) = request_json(&app, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Customer not found");

    let (status, _) = request_json(&app, "DELETE", &format!("/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_reflects_creates_and_deletes() {
    let app = test_app().await;

    let mut ids = Vec::new();
    for n in 0..3 {
        let mut payload = ada();
        payload["name"] = json!(format!("Customer {n}"));
        let (_, body) = request_json(&app, "POST", "/customers", Some(payload)).await;
        ids.push(body["id"].as_str().unwrap().to_owned());
    }

    let (_, _) = request_json(&app, "DELETE", &format!("/customers/{}", ids[0]), None).await;

    let (status, body) = request_json(&app, "GET", "/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_id_is_a_client_error() {
    let app = test_app().await;

    for method in ["GET", "DELETE"] {
        let (status, body) = request_json(&app, method, "/customers/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} /customers/{{id}}");
        assert!(body["error"].as_str().unwrap().contains("malformed"));
    }
}

// ============================================================================
// Browser UI
// ============================================================================

#[tokio::test]
async fn list_page_renders_grid_and_form() {
    let app = test_app().await;
    create_ada(&app).await;

    let (status, html) = request_text(&app, "GET", "/app/customers").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Customer Management"));
    assert!(html.contains("All Customers (1)"));
    assert!(html.contains("Add Customer"));
    assert!(html.contains("Ada"));
    assert!(html.contains("01/01/1990"));
}

#[tokio::test]
async fn list_page_edit_query_prefills_the_form() {
    let app = test_app().await;
    let created = create_ada(&app).await;
    let id = created["id"].as_str().unwrap();

    let (status, html) = request_text(&app, "GET", &format!("/app/customers?edit={id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"value="Ada""#));
    assert!(html.contains(r#"value="1990-01-01""#));
    assert!(html.contains(">Update<"));
    assert!(html.contains("Cancel"));
}

#[tokio::test]
async fn form_create_redirects_back_to_the_list() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/app/customers")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=Ada&date_of_birth=1990-01-01&member_number=42&interests=chess%2C+code",
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION].to_str().unwrap(),
        "/app/customers"
    );

    let (_, body) = request_json(&app, "GET", "/customers", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn form_with_bad_member_number_renders_error_page() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/app/customers")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=Ada&date_of_birth=1990-01-01&member_number=forty&interests=chess",
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8_lossy(&bytes).into_owned();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("Member Number must be an integer"));
    assert!(html.contains("Back to Customer List"));
}

#[tokio::test]
async fn detail_page_renders_profile() {
    let app = test_app().await;
    let created = create_ada(&app).await;
    let id = created["id"].as_str().unwrap();

    let (status, html) = request_text(&app, "GET", &format!("/app/customers/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Customer Details"));
    assert!(html.contains("Ada"));
    assert!(html.contains("#42"));
    assert!(html.contains("January 1, 1990"));
    assert!(html.contains("years old"));
    // Interests are split into chips.
    assert!(html.contains(">chess<"));
    assert!(html.contains(">code<"));
    assert!(html.contains("window.print()"));
}

#[tokio::test]
async fn detail_page_unknown_id_renders_not_found() {
    let app = test_app().await;

    let (status, html) = request_text(
        &app,
        "GET",
        "/app/customers/00000000-0000-4000-8000-000000000000",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Customer not found"));
    assert!(html.contains("Back to Customer List"));
}

#[tokio::test]
async fn form_update_replaces_the_record() {
    let app = test_app().await;
    let created = create_ada(&app).await;
    let id = created["id"].as_str().unwrap();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/app/customers/{id}"))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=Ada+Lovelace&date_of_birth=1990-01-01&member_number=7&interests=chess",
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, fetched) = request_json(&app, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(fetched["name"], "Ada Lovelace");
    assert_eq!(fetched["memberNumber"], 7);
}

#[tokio::test]
async fn form_delete_redirects_and_removes_the_record() {
    let app = test_app().await;
    let created = create_ada(&app).await;
    let id = created["id"].as_str().unwrap();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/app/customers/{id}/delete"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (status, _) = request_json(&app, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_endpoints_respond() {
    let app = test_app().await;

    let (status, body) = request_text(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _) = request_text(&app, "GET", "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn root_redirects_to_the_list_page() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION].to_str().unwrap(),
        "/app/customers"
    );
}
