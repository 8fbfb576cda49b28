//! Account registration and session lifecycle (login, logout).

pub mod manager;

pub use manager::{NewAccount, SessionManager};
