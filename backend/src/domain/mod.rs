//! Domain primitives and aggregates.
//!
//! Purpose: define the entities, search dispatch, and authentication
//! primitives used by the HTTP and persistence layers. Types here are
//! transport agnostic; adapters translate them at the edges.

pub mod account;
pub mod auth;
pub mod client;
pub mod error;
pub mod ports;
pub mod post;
pub mod roles;
pub mod search;

pub use self::account::{Account, NewAccount};
pub use self::auth::{AuthenticatedIdentity, LoginCredentials, LoginValidationError, Registration};
pub use self::client::{Client, ClientDraft};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::post::{Post, PostDraft};
pub use self::roles::{RoleSet, ADMIN_ROLE};
pub use self::search::{
    dispatch_post_search, MatchedCriterion, PostCriterion, PostSearchParams, SearchOutcome,
};

/// Convenient result alias for fallible domain operations.
pub type ApiResult<T> = Result<T, Error>;
