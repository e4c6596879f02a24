//! Authentication primitives: login credentials, registration requests,
//! and the authenticated identity stored in a session.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::roles::RoleSet;

/// Domain error returned when login or registration payload values are
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("admin", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request: a desired username, a cleartext password
/// to be hashed exactly once, and the role list the new account starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: String,
    password: Zeroizing<String>,
    roles: RoleSet,
}

impl Registration {
    /// Construct a registration from raw form inputs.
    ///
    /// The role list is the comma-separated form submitted by the caller;
    /// it is parsed once here and never re-split later.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        roles: &str,
    ) -> Result<Self, LoginValidationError> {
        let credentials = LoginCredentials::try_from_parts(username, password)?;
        Ok(Self {
            username: credentials.username,
            password: credentials.password,
            roles: RoleSet::parse(roles),
        })
    }

    /// Desired account name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Cleartext password, hashed by the registration service.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Roles the new account starts with. May be empty.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }
}

/// The identity a session carries between requests.
///
/// Derived from the verified account record on login (never from the raw
/// form field) and from the submitted registration on sign-up. The role set
/// is parsed once at establishment; authorisation checks read it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedIdentity {
    username: String,
    roles: RoleSet,
}

impl AuthenticatedIdentity {
    /// Build an identity from a verified username and parsed role set.
    pub fn new(username: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    /// Name of the authenticated account.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Roles granted to this identity.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Whether the identity may perform admin-only operations.
    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  alice  ", "secret")]
    #[case("bob", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[test]
    fn registration_parses_roles_once() {
        let registration = Registration::try_from_parts("alice", "pw", "ROLE_ADMIN,ROLE_USER")
            .expect("valid registration");
        assert!(registration.roles().is_admin());
        assert!(registration.roles().contains("ROLE_USER"));
    }

    #[test]
    fn registration_accepts_empty_role_list() {
        let registration =
            Registration::try_from_parts("alice", "pw", "").expect("valid registration");
        assert!(registration.roles().is_empty());
    }

    #[test]
    fn identity_admin_check_reads_parsed_set() {
        let identity = AuthenticatedIdentity::new("alice", RoleSet::parse("ROLE_ADMIN"));
        assert!(identity.is_admin());
        let plain = AuthenticatedIdentity::new("bob", RoleSet::parse("ROLE_USER"));
        assert!(!plain.is_admin());
    }

    #[test]
    fn identity_round_trips_through_json() {
        let identity = AuthenticatedIdentity::new("alice", RoleSet::parse("ROLE_USER"));
        let json = serde_json::to_string(&identity).expect("serialise identity");
        let decoded: AuthenticatedIdentity =
            serde_json::from_str(&json).expect("deserialise identity");
        assert_eq!(decoded, identity);
    }
}
