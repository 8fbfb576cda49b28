//! User domain entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, User};
pub use role::AccountRole;
