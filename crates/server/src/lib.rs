//! Clientele server library.
//!
//! This crate provides the customer-record service as a library, allowing
//! the router to be exercised in-process by tests and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod routes;
pub mod state;
