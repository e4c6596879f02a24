//! Password-hashing login and registration services over an account
//! repository.
//!
//! Passwords are stored as Argon2id PHC strings and verified with a
//! constant-time comparison. The cleartext password is hashed exactly once,
//! at registration; login re-derives the hash from the stored salt.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{AccountRepository, LoginService, RegistrationService};
use crate::domain::{
    AuthenticatedIdentity, Error, LoginCredentials, NewAccount, Registration,
};

/// Hash a cleartext password into an Argon2id PHC string.
fn hash_password(cleartext: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(cleartext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
}

/// Verify a cleartext password against a stored PHC string.
fn verify_password(cleartext: &str, stored: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(stored)
        .map_err(|err| Error::internal(format!("stored password hash is invalid: {err}")))?;
    Ok(Argon2::default()
        .verify_password(cleartext.as_bytes(), &parsed)
        .is_ok())
}

/// `LoginService` and `RegistrationService` backed by hashed credentials in
/// an account repository.
///
/// The identity returned on login is derived from the stored account record,
/// so roles always reflect what registration persisted.
#[derive(Clone)]
pub struct PasswordAccountService {
    accounts: Arc<dyn AccountRepository>,
}

impl PasswordAccountService {
    /// Create a service over the given account repository.
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl LoginService for PasswordAccountService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedIdentity, Error> {
        let Some(account) = self.accounts.find_by_name(credentials.username()).await? else {
            debug!(name = credentials.username(), "login for unknown account");
            return Err(Error::unauthorized("invalid credentials"));
        };

        if !verify_password(credentials.password(), &account.password_hash)? {
            warn!(name = credentials.username(), "login with wrong password");
            return Err(Error::unauthorized("invalid credentials"));
        }

        Ok(AuthenticatedIdentity::new(account.name, account.roles))
    }
}

#[async_trait]
impl RegistrationService for PasswordAccountService {
    async fn register(&self, registration: &Registration) -> Result<AuthenticatedIdentity, Error> {
        let account = self
            .accounts
            .insert(NewAccount {
                name: registration.username().to_owned(),
                password_hash: hash_password(registration.password())?,
                roles: registration.roles().clone(),
            })
            .await?;

        debug!(name = account.name, "account registered");
        Ok(AuthenticatedIdentity::new(account.name, account.roles))
    }
}
