use std::fmt;

use serde::{Deserialize, Serialize};

/// Access level of an account. Admins approve claims; users report and claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

/// A console account. Passwords are stored as given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// The administrator seeded on first run.
    pub fn default_admin() -> Self {
        Self {
            id: 1,
            name: "Admin".into(),
            email: "admin@dlfs.com".into(),
            password: "admin123".into(),
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
