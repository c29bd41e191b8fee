//! logtail API — library crate for the log tail HTTP server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `lt-e2e-tests`) can access `AppState`, `build_router`, and config.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
