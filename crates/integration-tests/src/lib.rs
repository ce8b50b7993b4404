//! Integration tests for Clientele.
//!
//! The in-process tests live in `crates/server/tests/`; this crate holds
//! smoke tests that exercise a real running server over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare and start the server
//! cargo run -p clientele-cli -- migrate
//! cargo run -p clientele-server
//!
//! # Run the live-server tests
//! cargo test -p clientele-integration-tests -- --ignored
//! ```
//!
//! The target server is configurable via `CLIENTELE_BASE_URL`
//! (default `http://localhost:3000`).
