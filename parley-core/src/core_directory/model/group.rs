//! Group model and the General-group invariants

use super::types::{ChannelId, GroupId};
use serde::{Deserialize, Serialize};

/// A group is a container for channels with its own member and admin rosters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,

    /// Human-readable name, unique case-insensitively across groups
    pub name: String,

    /// Username of the group owner
    pub owner_id: String,

    /// Usernames allowed to administer the group
    pub admin_ids: Vec<String>,

    /// Usernames belonging to the group
    pub member_ids: Vec<String>,

    /// Channels owned by this group, in creation order
    pub channel_ids: Vec<ChannelId>,
}

impl Group {
    /// Id of the mandatory default group
    pub const GENERAL_ID: &'static str = "g1";

    /// Name of the mandatory default group
    pub const GENERAL_NAME: &'static str = "General";

    /// Create a group owned by `owner`. The owner always leads the admin
    /// roster and is the sole initial member.
    pub fn new(id: GroupId, name: impl Into<String>, owner: &str, extra_admins: Vec<String>) -> Self {
        let mut admin_ids = Vec::with_capacity(1 + extra_admins.len());
        admin_ids.push(owner.to_string());
        admin_ids.extend(extra_admins);

        Group {
            id,
            name: name.into(),
            owner_id: owner.to_string(),
            admin_ids,
            member_ids: vec![owner.to_string()],
            channel_ids: Vec::new(),
        }
    }

    /// The fixed bootstrap shape of the General group
    pub fn general() -> Self {
        Group {
            id: GroupId::new(Self::GENERAL_ID),
            name: Self::GENERAL_NAME.to_string(),
            owner_id: "super".to_string(),
            admin_ids: vec!["super".to_string()],
            member_ids: Vec::new(),
            channel_ids: Vec::new(),
        }
    }

    /// The General group is recognized by name or by its fixed id
    pub fn is_general(&self) -> bool {
        self.name == Self::GENERAL_NAME || self.id.as_str() == Self::GENERAL_ID
    }

    pub fn is_admin(&self, username: &str) -> bool {
        self.admin_ids.iter().any(|a| a == username)
    }

    pub fn has_member(&self, username: &str) -> bool {
        self.member_ids.iter().any(|m| m == username)
    }

    /// Add a member, idempotently
    pub fn add_member(&mut self, username: &str) {
        if !self.has_member(username) {
            self.member_ids.push(username.to_string());
        }
    }

    /// Record a channel as belonging to this group
    pub fn add_channel(&mut self, channel_id: ChannelId) {
        self.channel_ids.push(channel_id);
    }
}
