//! # libris-entity
//!
//! Domain entity models for Libris. Database entities derive
//! `sqlx::FromRow`; value objects such as [`session::Identity`] live here
//! too so every layer shares one vocabulary.

pub mod session;
pub mod user;
