//! The customer document and its validated create/update payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::CustomerId;

/// Errors produced by field-level validation of a customer payload.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was not supplied.
    #[error("required field missing: {0}")]
    MissingField(&'static str),
    /// A supplied text field was empty after trimming.
    #[error("field must not be empty: {0}")]
    EmptyField(&'static str),
}

/// A persisted customer record.
///
/// `id` and `created_at` are assigned by the record store on creation and
/// never change afterwards. `interests` is deliberately kept as a single
/// comma-separated string; splitting it into tags is a presentation concern
/// (see [`interest_tags`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub member_number: i64,
    pub interests: String,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated create payload, as received from a client.
///
/// Every field is optional at this stage so that a missing field produces a
/// [`ValidationError`] naming the field, rather than a generic
/// deserialization failure. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_member_number")]
    pub member_number: Option<i64>,
    pub interests: Option<String>,
}

/// A fully validated customer, ready for the record store to persist.
///
/// Only obtainable through [`CustomerDraft::validate`], so no partial record
/// can reach the store layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub member_number: i64,
    pub interests: String,
}

impl CustomerDraft {
    /// Check that every required field is present and non-empty.
    ///
    /// Text fields are trimmed. Field names in errors use the wire spelling
    /// (`dateOfBirth`, `memberNumber`) since they surface to API clients.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first missing or empty field.
    pub fn validate(self) -> Result<NewCustomer, ValidationError> {
        let name = require_text(self.name, "name")?;
        let date_of_birth = self
            .date_of_birth
            .ok_or(ValidationError::MissingField("dateOfBirth"))?;
        let member_number = self
            .member_number
            .ok_or(ValidationError::MissingField("memberNumber"))?;
        let interests = require_text(self.interests, "interests")?;

        Ok(NewCustomer {
            name,
            date_of_birth,
            member_number,
            interests,
        })
    }
}

/// Partial update payload.
///
/// This is the explicit allowed-field set for updates: anything outside
/// these four fields is rejected at deserialization time rather than being
/// merged into the stored document. `id` and `createdAt` are immutable and
/// therefore absent here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_member_number")]
    pub member_number: Option<i64>,
    pub interests: Option<String>,
}

impl CustomerUpdate {
    /// Trim supplied text fields and reject ones that become empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] if a supplied text field is
    /// blank. Omitted fields are left untouched by the store.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let name = self.name.map(|v| trim_non_empty(v, "name")).transpose()?;
        let interests = self
            .interests
            .map(|v| trim_non_empty(v, "interests"))
            .transpose()?;

        Ok(Self {
            name,
            interests,
            ..self
        })
    }

    /// Whether the payload supplies no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date_of_birth.is_none()
            && self.member_number.is_none()
            && self.interests.is_none()
    }
}

fn require_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    trim_non_empty(value, field)
}

fn trim_non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_owned())
}

/// Accept a member number as a JSON number or a numeric string.
///
/// Browser forms submit numbers as strings, and the original wire format
/// tolerated both, so the API keeps accepting either shape.
fn lenient_member_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom("memberNumber must be an integer")),
    }
}

/// Split a stored interests string into display tags.
///
/// Splits on `,` and trims whitespace around each segment; empty segments
/// are dropped. The store keeps the raw delimited string.
#[must_use]
pub fn interest_tags(interests: &str) -> Vec<&str> {
    interests
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Whole years elapsed between `date_of_birth` and `today`.
///
/// Computed as `floor(elapsed_days / 365.25)`, matching the display rule of
/// the detail view. Returns 0 for a date of birth in the future.
#[must_use]
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> i64 {
    let days = (today - date_of_birth).num_days();
    if days <= 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    {
        (days as f64 / 365.25).floor() as i64
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_draft() -> CustomerDraft {
        CustomerDraft {
            name: Some("Ada".to_owned()),
            date_of_birth: Some(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()),
            member_number: Some(42),
            interests: Some("chess, code".to_owned()),
        }
    }

    #[test]
    fn draft_with_all_fields_validates() {
        let new = full_draft().validate().unwrap();
        assert_eq!(new.name, "Ada");
        assert_eq!(new.member_number, 42);
        assert_eq!(new.interests, "chess, code");
    }

    #[test]
    fn draft_missing_name_is_rejected() {
        let draft = CustomerDraft {
            name: None,
            ..full_draft()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::MissingField("name")
        );
    }

    #[test]
    fn draft_with_blank_name_is_rejected() {
        let draft = CustomerDraft {
            name: Some("   ".to_owned()),
            ..full_draft()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::EmptyField("name")
        );
    }

    #[test]
    fn draft_trims_text_fields() {
        let draft = CustomerDraft {
            name: Some("  Ada  ".to_owned()),
            interests: Some(" chess, code ".to_owned()),
            ..full_draft()
        };
        let new = draft.validate().unwrap();
        assert_eq!(new.name, "Ada");
        assert_eq!(new.interests, "chess, code");
    }

    #[test]
    fn draft_accepts_member_number_as_string() {
        let draft: CustomerDraft =
            serde_json::from_str(r#"{"name":"Ada","memberNumber":"42"}"#).unwrap();
        assert_eq!(draft.member_number, Some(42));
    }

    #[test]
    fn draft_rejects_non_numeric_member_number() {
        let result: Result<CustomerDraft, _> =
            serde_json::from_str(r#"{"memberNumber":"forty-two"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_rejects_unknown_fields() {
        let result: Result<CustomerUpdate, _> =
            serde_json::from_str(r#"{"name":"Ada","isAdmin":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_allows_any_subset() {
        let update: CustomerUpdate = serde_json::from_str(r#"{"memberNumber":99}"#).unwrap();
        assert!(update.name.is_none());
        assert_eq!(update.member_number, Some(99));
        assert!(!update.is_empty());
    }

    #[test]
    fn update_with_blank_interests_is_rejected() {
        let update: CustomerUpdate = serde_json::from_str(r#"{"interests":"  "}"#).unwrap();
        assert_eq!(
            update.validated().unwrap_err(),
            ValidationError::EmptyField("interests")
        );
    }

    #[test]
    fn customer_serializes_with_wire_names() {
        let customer = Customer {
            id: CustomerId::generate(),
            name: "Ada".to_owned(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            member_number: 42,
            interests: "chess, code".to_owned(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["dateOfBirth"], "1990-01-01");
        assert_eq!(json["memberNumber"], 42);
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn interest_tags_splits_and_trims() {
        assert_eq!(
            interest_tags("movies, football ,gym,  gaming"),
            vec!["movies", "football", "gym", "gaming"]
        );
        assert_eq!(interest_tags("chess"), vec!["chess"]);
        assert!(interest_tags(" , ,").is_empty());
    }

    #[test]
    fn age_is_floored_against_the_julian_year() {
        let dob = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        // 1990-06-15 to 2020-06-15 spans 10958 days (8 leap days), which
        // crosses the 30 * 365.25 = 10957.5 day threshold on the birthday.
        let day_before = NaiveDate::from_ymd_opt(2020, 6, 14).unwrap();
        let day_of = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        assert_eq!(age_in_years(dob, day_before), 29);
        assert_eq!(age_in_years(dob, day_of), 30);
    }

    #[test]
    fn age_never_goes_negative() {
        let dob = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(age_in_years(dob, today), 0);
    }
}
