//! Port abstraction for client persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::client::{Client, ClientDraft};
use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by client repository adapters.
    pub enum ClientPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "client repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "client repository query failed: {message}",
    }
}

impl From<ClientPersistenceError> for Error {
    fn from(error: ClientPersistenceError) -> Self {
        match error {
            ClientPersistenceError::Connection { message } => Self::service_unavailable(message),
            ClientPersistenceError::Query { message } => Self::internal(message),
        }
    }
}

/// Driven port for client records.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Every client, in storage order.
    async fn list(&self) -> Result<Vec<Client>, ClientPersistenceError>;

    /// Clients whose concatenated id+name+date+service+master haystack
    /// contains `keyword` (case-sensitive), in storage order.
    async fn search(&self, keyword: &str) -> Result<Vec<Client>, ClientPersistenceError>;

    /// Fetch a client by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, ClientPersistenceError>;

    /// Insert (draft without id) or update (draft with id) a client,
    /// returning the persisted record.
    async fn save(&self, draft: ClientDraft) -> Result<Client, ClientPersistenceError>;

    /// Delete a client by identifier. Deleting an absent id is not an
    /// error.
    async fn delete(&self, id: i64) -> Result<(), ClientPersistenceError>;
}
