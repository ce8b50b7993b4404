//! Server-rendered browser UI for customer management.
//!
//! The list page carries the grid and a single form shared between create
//! and edit (switched by the `?edit={id}` query). Every mutation redirects
//! back to the list so the next render always reflects a fresh query of the
//! store - no incremental patching of view state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::instrument;

use clientele_core::{
    Customer, CustomerDraft, CustomerId, CustomerUpdate, ValidationError, age_in_years,
    interest_tags,
};

use crate::db::CustomerRepository;
use crate::filters;
use crate::state::AppState;

/// Errors surfaced by the page handlers, rendered as HTML.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The submitted form or route identifier was invalid.
    #[error("{0}")]
    Invalid(String),

    /// No customer exists for the given identifier.
    #[error("Customer not found")]
    NotFound,

    /// Persistence-layer failure.
    #[error("{0}")]
    Repository(#[from] crate::db::RepositoryError),
}

impl From<ValidationError> for PageError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Invalid(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Repository(err) => {
                tracing::error!(error = %err, "Page request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again.".to_owned(),
                )
            }
        };

        (status, ErrorPageTemplate { message }).into_response()
    }
}

// =============================================================================
// View Models
// =============================================================================

/// One grid row on the list page.
pub struct CustomerRowView {
    pub id: String,
    pub name: String,
    /// ISO date, formatted by the `short_date` filter in the template.
    pub date_of_birth: String,
    pub member_number: i64,
    pub interests: String,
}

impl From<&Customer> for CustomerRowView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.name.clone(),
            date_of_birth: customer.date_of_birth.to_string(),
            member_number: customer.member_number,
            interests: customer.interests.clone(),
        }
    }
}

/// The shared create/edit form state.
pub struct CustomerFormView {
    pub edit_mode: bool,
    /// Where the form posts: the create endpoint, or the record's update
    /// endpoint when editing.
    pub action: String,
    pub name: String,
    pub date_of_birth: String,
    pub member_number: String,
    pub interests: String,
}

impl CustomerFormView {
    fn create() -> Self {
        Self {
            edit_mode: false,
            action: "/app/customers".to_owned(),
            name: String::new(),
            date_of_birth: String::new(),
            member_number: String::new(),
            interests: String::new(),
        }
    }

    /// Pre-fill from an existing record; the date is already in the
    /// `YYYY-MM-DD` shape a date input expects.
    fn edit(customer: &Customer) -> Self {
        Self {
            edit_mode: true,
            action: format!("/app/customers/{}", customer.id),
            name: customer.name.clone(),
            date_of_birth: customer.date_of_birth.to_string(),
            member_number: customer.member_number.to_string(),
            interests: customer.interests.clone(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Customer list page template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub customers: Vec<CustomerRowView>,
    pub count: usize,
    pub form: CustomerFormView,
    pub load_error: Option<String>,
}

/// Customer detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/show.html")]
pub struct CustomerShowTemplate {
    pub id: String,
    pub name: String,
    pub member_number: i64,
    /// ISO date, formatted by the `long_date` filter in the template.
    pub date_of_birth: String,
    pub age_years: i64,
    pub interests: Vec<String>,
    /// ISO date the record was created.
    pub member_since: String,
}

impl From<&Customer> for CustomerShowTemplate {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.name.clone(),
            member_number: customer.member_number,
            date_of_birth: customer.date_of_birth.to_string(),
            age_years: age_in_years(customer.date_of_birth, Utc::now().date_naive()),
            interests: interest_tags(&customer.interests)
                .into_iter()
                .map(ToOwned::to_owned)
                .collect(),
            member_since: customer.created_at.date_naive().to_string(),
        }
    }
}

/// Not-found state of the detail page.
#[derive(Template, WebTemplate)]
#[template(path = "customers/not_found.html")]
pub struct CustomerNotFoundTemplate {}

/// Generic error page with a return link.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorPageTemplate {
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// List page query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Identifier of the record to load into the form for editing.
    pub edit: Option<String>,
}

/// Customer list page with the shared create/edit form.
///
/// `GET /app/customers` (optionally `?edit={id}`)
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> CustomersIndexTemplate {
    let repo = CustomerRepository::new(state.pool());

    let (customers, load_error) = match repo.list().await {
        Ok(list) => (list.iter().map(CustomerRowView::from).collect(), None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load customer list");
            (
                Vec::new(),
                Some("Failed to load customers. Please try again.".to_owned()),
            )
        }
    };

    let form = match query.edit.as_deref().map(str::parse::<CustomerId>) {
        Some(Ok(id)) => match repo.get(id).await {
            Ok(Some(customer)) => CustomerFormView::edit(&customer),
            // An unknown or unreadable edit target falls back to create mode.
            _ => CustomerFormView::create(),
        },
        _ => CustomerFormView::create(),
    };

    CustomersIndexTemplate {
        count: customers.len(),
        customers,
        form,
        load_error,
    }
}

/// Customer detail page.
///
/// `GET /app/customers/{id}` - renders the profile, a not-found state, or
/// an error state with a return link.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<CustomerId>() else {
        return (
            StatusCode::BAD_REQUEST,
            ErrorPageTemplate {
                message: "Customer not found".to_owned(),
            },
        )
            .into_response();
    };

    match CustomerRepository::new(state.pool()).get(id).await {
        Ok(Some(customer)) => CustomerShowTemplate::from(&customer).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, CustomerNotFoundTemplate {}).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch customer detail");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorPageTemplate {
                    message: "Failed to fetch customer".to_owned(),
                },
            )
                .into_response()
        }
    }
}

/// Form body shared by the create and update submissions.
///
/// Fields arrive as strings from the browser; conversion failures become a
/// 400 error page rather than reaching the store.
#[derive(Debug, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub date_of_birth: String,
    pub member_number: String,
    pub interests: String,
}

impl CustomerForm {
    fn into_draft(self) -> Result<CustomerDraft, PageError> {
        let date_of_birth = parse_optional(&self.date_of_birth, |raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| PageError::Invalid("Date of Birth must be a valid date".to_owned()))
        })?;
        let member_number = parse_optional(&self.member_number, |raw| {
            raw.parse::<i64>()
                .map_err(|_| PageError::Invalid("Member Number must be an integer".to_owned()))
        })?;

        Ok(CustomerDraft {
            name: non_empty(self.name),
            date_of_birth,
            member_number,
            interests: non_empty(self.interests),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_optional<T>(
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, PageError>,
) -> Result<Option<T>, PageError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse(raw).map(Some)
}

/// Create a customer from the form, then return to the (re-queried) list.
///
/// `POST /app/customers`
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect, PageError> {
    let new = form.into_draft()?.validate()?;

    CustomerRepository::new(state.pool()).create(&new).await?;

    Ok(Redirect::to("/app/customers"))
}

/// Update a customer from the form, then return to the (re-queried) list.
///
/// `POST /app/customers/{id}` - the form submits the full field set, so
/// this is a whole-document replacement of the mutable fields.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect, PageError> {
    let id: CustomerId = id
        .parse()
        .map_err(|_| PageError::Invalid("Customer not found".to_owned()))?;
    let new = form.into_draft()?.validate()?;

    let changes = CustomerUpdate {
        name: Some(new.name),
        date_of_birth: Some(new.date_of_birth),
        member_number: Some(new.member_number),
        interests: Some(new.interests),
    };

    CustomerRepository::new(state.pool())
        .update(id, &changes)
        .await?
        .ok_or(PageError::NotFound)?;

    Ok(Redirect::to("/app/customers"))
}

/// Delete a customer (the row's button asks for confirmation first), then
/// return to the list.
///
/// `POST /app/customers/{id}/delete`
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    let id: CustomerId = id
        .parse()
        .map_err(|_| PageError::Invalid("Customer not found".to_owned()))?;

    // A record deleted by someone else in the meantime still lands back on
    // the list, which simply no longer shows it.
    CustomerRepository::new(state.pool()).delete(id).await?;

    Ok(Redirect::to("/app/customers"))
}
