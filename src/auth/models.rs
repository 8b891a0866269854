//! Identity models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portal roles for authorization
///
/// This is the single canonical representation of a role. Every comparison in
/// the policy goes through this enum; the raw claim string is parsed exactly
/// once, in the session resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access, including user management
    SuperAdmin,
    /// Administrative access to the dashboard
    Admin,
    /// Content editor - limited to news, blog and own profile
    Editor,
    /// Instructor - dashboard minus content/user management sections
    Teacher,
    /// Enrolled student - profile only, no dashboard
    Student,
}

impl Role {
    /// All roles, in policy-table order
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Editor,
        Role::Teacher,
        Role::Student,
    ];

    /// Wire representation used in token claims and cookies
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Back-office staff roles (everyone except students)
    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(UnknownRole),
        }
    }
}

/// A role claim outside the closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownRole;

/// The verified identity behind a request
///
/// Reconstructed from the session token on every request; a plain value,
/// never cached across requests and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque identifier correlating to a backend user record
    pub subject_id: String,
    /// The verified role claim
    pub role: Role,
}

impl Identity {
    pub fn new(subject_id: impl Into<String>, role: Role) -> Self {
        Self {
            subject_id: subject_id.into(),
            role,
        }
    }
}
