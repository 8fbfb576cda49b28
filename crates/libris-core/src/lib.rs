//! # libris-core
//!
//! Core crate for the Libris library backend. Contains configuration
//! schemas, the unified error system, and small primitives shared by
//! every other crate.
//!
//! This crate has **no** internal dependencies on other Libris crates.

pub mod config;
pub mod crypto;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
