//! Role claims and the capabilities derived from them.
//!
//! The backend puts the user's role into the token either as a single string
//! or as a list of strings. That shape is normalized once, at the decoding
//! boundary, into a [`RoleSet`] of raw role names. Raw casing is preserved in
//! the set; every comparison is case-insensitive and ignores surrounding
//! whitespace on the stored value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::claims::{self, Claims};

/// The role claim as it appears in the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    /// `"role": "Admin"`
    Single(String),
    /// `"role": ["admin", "instructor"]`
    Multiple(Vec<String>),
}

/// A capability the dashboard knows how to gate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages projects, groups and instructors.
    Admin,
    /// Supervises groups and messages their members.
    Instructor,
    /// Member of a project group.
    Student,
}

impl Role {
    /// All known roles, in menu order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Instructor, Role::Student];

    /// Returns the canonical lower-case name of this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Instructor => "instructor",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized set of role names taken from a token's role claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    roles: BTreeSet<String>,
}

impl RoleSet {
    /// Creates an empty role set.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a role set from a role claim, if any.
    #[must_use]
    pub fn from_claim(claim: Option<&RoleClaim>) -> Self {
        let roles = match claim {
            None => BTreeSet::new(),
            Some(RoleClaim::Single(role)) => BTreeSet::from([role.clone()]),
            Some(RoleClaim::Multiple(roles)) => roles.iter().cloned().collect(),
        };
        Self { roles }
    }

    /// Returns true if any stored role, trimmed and lower-cased, equals
    /// `target` lower-cased.
    #[must_use]
    pub fn has_role(&self, target: &str) -> bool {
        let target = target.to_lowercase();
        self.roles
            .iter()
            .any(|role| role.trim().to_lowercase() == target)
    }

    /// Returns true if the set grants the given capability.
    #[must_use]
    pub fn grants(&self, role: Role) -> bool {
        self.has_role(role.as_str())
    }

    /// Maps the set onto the dashboard's capability flags.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            admin: self.grants(Role::Admin),
            instructor: self.grants(Role::Instructor),
            student: self.grants(Role::Student),
        }
    }

    /// Returns true if the set holds no roles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Returns the number of distinct raw role names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Iterates over the raw role names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }
}

impl From<RoleClaim> for RoleSet {
    fn from(claim: RoleClaim) -> Self {
        Self::from_claim(Some(&claim))
    }
}

/// Boolean capability flags derived from a [`RoleSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub admin: bool,
    pub instructor: bool,
    pub student: bool,
}

impl Capabilities {
    /// Returns true if the flag for `role` is set.
    #[must_use]
    pub fn has(&self, role: Role) -> bool {
        match role {
            Role::Admin => self.admin,
            Role::Instructor => self.instructor,
            Role::Student => self.student,
        }
    }
}

/// Resolves the role set carried by decoded claims.
#[must_use]
pub fn resolve_roles(claims: &Claims) -> RoleSet {
    RoleSet::from_claim(claims.role())
}

/// Resolves the role set for a possibly absent, possibly malformed token.
///
/// A malformed token is treated as carrying no roles, so the navigation
/// render path never sees a decode failure.
#[must_use]
pub fn roles_for_token(token: Option<&str>) -> RoleSet {
    let Some(token) = token else {
        return RoleSet::none();
    };

    match claims::decode(token) {
        Ok(claims) => resolve_roles(&claims),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring undecodable session token for role resolution");
            RoleSet::none()
        }
    }
}
