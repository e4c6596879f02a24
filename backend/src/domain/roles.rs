//! Role tokens granting access to gated operations.
//!
//! Accounts persist their roles as a comma-separated string (for example
//! `"ROLE_ADMIN,ROLE_USER"`). That form is parsed exactly once, when the
//! account is loaded or the session established, into a [`RoleSet`];
//! authorisation checks never re-split the stored string.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Role token required by admin-only operations.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// An explicit set of role tokens held by an authenticated identity.
///
/// ## Invariants
/// - Tokens are trimmed and non-empty; parsing drops blank segments.
/// - The set may be empty: such an identity is authenticated but
///   unprivileged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    /// Parse a comma-separated role list into a set of tokens.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{RoleSet, ADMIN_ROLE};
    ///
    /// let roles = RoleSet::parse("ROLE_ADMIN, ROLE_USER");
    /// assert!(roles.is_admin());
    /// assert!(roles.contains("ROLE_USER"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Whether the set holds the given token.
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Whether the set grants admin-only operations.
    pub fn is_admin(&self) -> bool {
        self.contains(ADMIN_ROLE)
    }

    /// Whether the identity holds no roles at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the set back to its comma-separated storage form.
    pub fn as_csv(&self) -> String {
        self.0.iter().cloned().collect::<Vec<_>>().join(",")
    }

    /// Iterate over the held tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_csv())
    }
}

impl FromIterator<String> for RoleSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ROLE_ADMIN,ROLE_USER", true, 2)]
    #[case("ROLE_USER", false, 1)]
    #[case(" ROLE_ADMIN ", true, 1)]
    #[case("", false, 0)]
    #[case(",,", false, 0)]
    fn parse_splits_and_trims(#[case] raw: &str, #[case] admin: bool, #[case] len: usize) {
        let roles = RoleSet::parse(raw);
        assert_eq!(roles.is_admin(), admin);
        assert_eq!(roles.iter().count(), len);
    }

    #[test]
    fn empty_set_is_valid_and_unprivileged() {
        let roles = RoleSet::parse("");
        assert!(roles.is_empty());
        assert!(!roles.is_admin());
    }

    #[test]
    fn csv_round_trips_in_sorted_order() {
        let roles = RoleSet::parse("ROLE_USER,ROLE_ADMIN");
        assert_eq!(roles.as_csv(), "ROLE_ADMIN,ROLE_USER");
        assert_eq!(RoleSet::parse(&roles.as_csv()), roles);
    }

    #[test]
    fn duplicate_tokens_collapse() {
        let roles = RoleSet::parse("ROLE_USER,ROLE_USER");
        assert_eq!(roles.iter().count(), 1);
    }
}
