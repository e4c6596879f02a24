//! Port abstraction for blog post persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::post::{Post, PostDraft};
use crate::domain::search::PostCriterion;
use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

impl From<PostPersistenceError> for Error {
    fn from(error: PostPersistenceError) -> Self {
        match error {
            PostPersistenceError::Connection { message } => Self::service_unavailable(message),
            PostPersistenceError::Query { message } => Self::internal(message),
        }
    }
}

/// Driven port for blog post records.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every post, in storage order.
    async fn list(&self) -> Result<Vec<Post>, PostPersistenceError>;

    /// Posts matching a single resolved criterion (case-sensitive
    /// substring semantics per [`Post::matches`]), in storage order.
    async fn search_by(
        &self,
        criterion: PostCriterion,
        keyword: &str,
    ) -> Result<Vec<Post>, PostPersistenceError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, PostPersistenceError>;

    /// Insert (draft without id) or update (draft with id) a post,
    /// returning the persisted record.
    async fn save(&self, draft: PostDraft) -> Result<Post, PostPersistenceError>;

    /// Delete a post by identifier. Deleting an absent id is not an error.
    async fn delete(&self, id: i64) -> Result<(), PostPersistenceError>;
}
