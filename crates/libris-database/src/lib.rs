//! # libris-database
//!
//! PostgreSQL connection management, the persistence traits used by the
//! auth layer, and both a Postgres and an in-memory implementation of them.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::{DatabasePool, StoreStatus};
pub use memory::MemoryStore;
pub use repositories::{TokenRepository, UserRepository};
pub use store::{TokenStore, UserStore};
