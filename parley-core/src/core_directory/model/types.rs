//! Common types for directory models
//!
//! Defines:
//! - User roles
//! - IDs for groups and channels

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alphabet for generated id suffixes (base-36, lowercase)
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix in generated ids
const ID_SUFFIX_LEN: usize = 6;

/// Generate a prefixed id such as `g4k2x9q` or `c81ma0z`
fn generate_id(prefix: char) -> String {
    let mut rng = rand::thread_rng();
    let mut id = String::with_capacity(1 + ID_SUFFIX_LEN);
    id.push(prefix);
    for _ in 0..ID_SUFFIX_LEN {
        id.push(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char);
    }
    id
}

/// Privilege level of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// Default role, no management rights
    User,
    /// May create channels in groups where listed as admin
    GroupAdmin,
    /// Unrestricted user/group management rights
    SuperAdmin,
}

impl Role {
    /// Wire representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::GroupAdmin => "groupAdmin",
            Role::SuperAdmin => "superAdmin",
        }
    }

    /// Parse a wire role string, `None` if unknown
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "groupAdmin" => Some(Role::GroupAdmin),
            "superAdmin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unique identifier for a group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        GroupId(id.into())
    }

    /// Generate a fresh id: `g` followed by six base-36 characters
    pub fn generate() -> Self {
        GroupId(generate_id('g'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a channel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        ChannelId(id.into())
    }

    /// Generate a fresh id: `c` followed by six base-36 characters
    pub fn generate() -> Self {
        ChannelId(generate_id('c'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
