//! PostgreSQL store implementations.

pub mod token;
pub mod user;

pub use token::TokenRepository;
pub use user::UserRepository;
