//! Driving ports for login and registration use-cases.
//!
//! In hexagonal terms these are *driving* ports: inbound adapters call
//! them to authenticate or register without knowing (or importing) the
//! backing infrastructure. HTTP handler tests substitute a test double
//! instead of wiring persistence and password hashing.

use async_trait::async_trait;

use crate::domain::auth::{AuthenticatedIdentity, LoginCredentials, Registration};
use crate::domain::Error;

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the verified identity.
    ///
    /// The returned identity is derived from the stored account record,
    /// never from the submitted form data.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedIdentity, Error>;
}

/// Domain use-case port for account registration.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Hash the password, persist the account, and return the identity
    /// the new session should carry.
    async fn register(&self, registration: &Registration)
        -> Result<AuthenticatedIdentity, Error>;
}
