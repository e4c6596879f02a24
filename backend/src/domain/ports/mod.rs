//! Domain ports: async traits the inbound adapters call and the outbound
//! adapters implement.

mod account_repository;
mod client_repository;
mod login_service;
mod macros;
mod post_repository;

pub use account_repository::{AccountPersistenceError, AccountRepository};
pub use client_repository::{ClientPersistenceError, ClientRepository};
pub use login_service::{LoginService, RegistrationService};
pub use post_repository::{PostPersistenceError, PostRepository};

pub(crate) use macros::define_port_error;
