//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

pub mod diesel_account_repository;
pub mod diesel_client_repository;
pub mod diesel_error_mapping;
pub mod diesel_post_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_client_repository::DieselClientRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use pool::{DbPool, PoolError};
