//! Port abstraction for account credential persistence and its errors.

use async_trait::async_trait;

use crate::domain::account::{Account, NewAccount};
use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// The account name is already taken.
        DuplicateName { name: String } => "account name already taken: {name}",
    }
}

impl From<AccountPersistenceError> for Error {
    fn from(error: AccountPersistenceError) -> Self {
        match error {
            AccountPersistenceError::Connection { message } => Self::service_unavailable(message),
            AccountPersistenceError::Query { message } => Self::internal(message),
            AccountPersistenceError::DuplicateName { name } => {
                Self::conflict(format!("account name already taken: {name}"))
            }
        }
    }
}

/// Driven port for account credential records.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create an account, failing with `DuplicateName` when the name is
    /// already registered.
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountPersistenceError>;

    /// Fetch an account by its unique name.
    async fn find_by_name(&self, name: &str)
        -> Result<Option<Account>, AccountPersistenceError>;
}
