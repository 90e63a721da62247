//! Upload Relay API Library
//!
//! This crate provides the HTTP handlers, the two upload pipelines and the
//! application setup.

// Module declarations
mod handlers;
mod middleware;
mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::HttpAppError;
pub use state::AppState;
