//! Account credential records.
//!
//! Accounts exist purely to gate HTTP access; they are independent of the
//! client and post records. The password is hashed exactly once at
//! registration and only the hash is ever stored or compared.

use crate::domain::roles::RoleSet;

/// A persisted account credential record.
///
/// ## Invariants
/// - `name` is unique across accounts.
/// - `password_hash` is an Argon2id PHC string; the cleartext is never
///   retained after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Store-assigned identifier.
    pub id: i32,
    /// Unique account name.
    pub name: String,
    /// Argon2id PHC hash of the password.
    pub password_hash: String,
    /// Roles held by the account, parsed once at load time.
    pub roles: RoleSet,
}

/// Payload for creating an account; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Desired unique account name.
    pub name: String,
    /// Argon2id PHC hash of the submitted password.
    pub password_hash: String,
    /// Roles the account starts with.
    pub roles: RoleSet,
}
