//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ClientRepository, LoginService, PostRepository, RegistrationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Client record persistence.
    pub clients: Arc<dyn ClientRepository>,
    /// Blog post persistence.
    pub posts: Arc<dyn PostRepository>,
    /// Login use-case.
    pub login: Arc<dyn LoginService>,
    /// Registration use-case.
    pub registration: Arc<dyn RegistrationService>,
}
