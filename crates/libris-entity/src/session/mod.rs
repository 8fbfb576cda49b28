//! Session domain entities: bearer tokens, their scopes, and the
//! per-request identity they resolve to.

pub mod identity;
pub mod scope;
pub mod token;

pub use identity::{AuthenticatedUser, Identity};
pub use scope::TokenScope;
pub use token::{IssuedToken, Token};
