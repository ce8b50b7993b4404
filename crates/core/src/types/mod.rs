//! Core types for Clientele.
//!
//! This module provides the customer document and its validated payloads.

pub mod customer;
pub mod id;

pub use customer::{Customer, CustomerDraft, CustomerUpdate, NewCustomer, ValidationError};
pub use customer::{age_in_years, interest_tags};
pub use id::{CustomerId, MalformedIdError};
