//! User account model

use super::types::Role;
use serde::{Deserialize, Serialize};

/// A registered user account
///
/// The username doubles as the account's unique key; groups and channels
/// reference users by it. Passwords are stored and compared in plaintext,
/// matching the wire contract this service replaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique account name
    pub username: String,

    /// Plaintext password
    pub password: String,

    /// Contact email
    pub email: String,

    /// Privilege level
    pub role: Role,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        User {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            role,
        }
    }

    /// Check credentials against this account
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}
