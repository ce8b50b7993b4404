//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::NaiveDate;

/// Format an ISO date (`YYYY-MM-DD`) as a long date, e.g. `January 1, 1990`.
///
/// Non-date input is passed through unchanged.
///
/// Usage in templates: `{{ customer.date_of_birth|long_date }}`
#[askama::filter_fn]
pub fn long_date(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_or(raw, |date| date.format("%B %-d, %Y").to_string()))
}

/// Format an ISO date (`YYYY-MM-DD`) as `MM/DD/YYYY` for the list grid.
///
/// Non-date input is passed through unchanged.
///
/// Usage in templates: `{{ customer.date_of_birth|short_date }}`
#[askama::filter_fn]
pub fn short_date(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_or(raw, |date| date.format("%m/%d/%Y").to_string()))
}
