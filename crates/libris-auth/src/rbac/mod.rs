//! Role-based guards over the request's bound identity.

pub mod guard;

pub use guard::{require_admin, require_user};
