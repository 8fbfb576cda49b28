//! # libris-api
//!
//! HTTP API layer for Libris built on Axum.
//!
//! Provides the account and session endpoints, the bearer-token
//! authentication middleware, per-route guards, extractors, DTOs, and
//! error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
