//! Clientele Core - Shared domain types.
//!
//! This crate provides the customer-record domain model used across all
//! Clientele components:
//! - `server` - JSON API and server-rendered browser UI
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - The `Customer` document, its identifier, and the validated
//!   create/update payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
