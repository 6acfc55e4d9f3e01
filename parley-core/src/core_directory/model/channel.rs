//! Channel model

use super::types::{ChannelId, GroupId};
use serde::{Deserialize, Serialize};

/// A communication channel owned by a group
///
/// Channel names are unique within the owning group (exact match, unlike
/// the case-insensitive group names). Deleting the group deletes its
/// channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Unique identifier
    pub id: ChannelId,

    /// Owning group
    pub group_id: GroupId,

    /// Channel name, unique within the owning group
    pub name: String,

    /// Usernames belonging to the channel. Snapshotted from the group's
    /// member roster at creation time; membership does not track the
    /// group afterwards.
    pub member_ids: Vec<String>,
}

impl Channel {
    pub fn new(
        id: ChannelId,
        group_id: GroupId,
        name: impl Into<String>,
        member_ids: Vec<String>,
    ) -> Self {
        Channel {
            id,
            group_id,
            name: name.into(),
            member_ids,
        }
    }
}
