//! Customer record identifier.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a string is not a syntactically valid [`CustomerId`].
#[derive(thiserror::Error, Debug, Clone)]
#[error("malformed customer id: {input}")]
pub struct MalformedIdError {
    /// The rejected input.
    pub input: String,
}

/// Unique identifier for a customer record.
///
/// Assigned by the record store on creation and immutable afterwards.
/// Identifiers are UUIDv4, so a deleted record's identifier is never reused.
///
/// ## Examples
///
/// ```
/// use clientele_core::CustomerId;
///
/// let id = CustomerId::generate();
/// let parsed: CustomerId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
///
/// assert!("not-a-uuid".parse::<CustomerId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = MalformedIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| MalformedIdError {
            input: s.to_owned(),
        })
    }
}

impl From<Uuid> for CustomerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
