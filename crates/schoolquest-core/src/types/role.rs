//! User roles as defined by the SchoolQuest backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role attached to every authenticated user.
///
/// Serde tags match the wire values used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// A student: completes missions, joins clans, redeems rewards.
    #[serde(rename = "aluno")]
    Student,
    /// A professor: creates and validates missions.
    #[serde(rename = "professor")]
    Professor,
    /// A school manager: administers users and analytics for one school.
    #[serde(rename = "gestor")]
    Manager,
    /// A platform administrator.
    #[serde(rename = "admin")]
    Admin,
}

impl UserRole {
    /// Whether this role is staff (professor or above).
    pub fn is_staff(&self) -> bool {
        !matches!(self, Self::Student)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "aluno"),
            Self::Professor => write!(f, "professor"),
            Self::Manager => write!(f, "gestor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}
