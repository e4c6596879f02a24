//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal
//! with domain-friendly operations: persisting an authenticated identity,
//! requiring one, and requiring the admin role. The identity (username
//! plus parsed role set) is the only session payload; its state machine is
//! Anonymous -> Authenticated -> Anonymous with no intermediate states.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthenticatedIdentity, Error};

pub(crate) const IDENTITY_KEY: &str = "identity";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_identity(&self, identity: &AuthenticatedIdentity) -> Result<(), Error> {
        self.0
            .insert(IDENTITY_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current identity from the session, if present.
    ///
    /// A cookie payload that fails to decode is treated as anonymous
    /// rather than an error; tampered cookies must not grant access.
    pub fn identity(&self) -> Result<Option<AuthenticatedIdentity>, Error> {
        match self.0.get::<AuthenticatedIdentity>(IDENTITY_KEY) {
            Ok(identity) => Ok(identity),
            Err(error) => {
                tracing::warn!("invalid identity in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// Require an authenticated identity or redirect to the login form.
    pub fn require_identity(&self) -> Result<AuthenticatedIdentity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an authenticated identity holding the admin role.
    pub fn require_admin(&self) -> Result<AuthenticatedIdentity, Error> {
        let identity = self.require_identity()?;
        if identity.is_admin() {
            Ok(identity)
        } else {
            Err(Error::forbidden("admin role required"))
        }
    }

    /// Drop any state the caller arrived with before establishing a fresh
    /// identity. A purged session ignores later inserts, so this clears and
    /// renews instead.
    pub fn reset(&self) {
        self.0.clear();
        self.0.renew();
    }

    /// Drop the session and its cookie; the caller becomes anonymous.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
