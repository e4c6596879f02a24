//! Outbound adapters: credential hashing and PostgreSQL persistence.

pub mod auth;
pub mod persistence;
