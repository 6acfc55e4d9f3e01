//! The persisted state aggregate

use super::channel::Channel;
use super::group::Group;
use super::types::{ChannelId, GroupId};
use super::user::User;
use serde::{Deserialize, Serialize};

/// Everything the service persists: the full rosters of users, groups,
/// and channels. Loaded once at startup and rewritten wholesale on every
/// mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct State {
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub channels: Vec<Channel>,
}

impl State {
    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn find_user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.username == username)
    }

    /// Resolve a requester to an existing superAdmin account
    pub fn find_super_admin(&self, username: &str) -> Option<&User> {
        self.find_user(username).filter(|u| u.is_super_admin())
    }

    pub fn find_group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| &g.id == id)
    }

    pub fn find_group_mut(&mut self, id: &GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| &g.id == id)
    }

    /// Case-insensitive group name lookup
    pub fn group_name_taken(&self, name: &str) -> bool {
        self.groups
            .iter()
            .any(|g| g.name.eq_ignore_ascii_case(name))
    }

    pub fn group_id_taken(&self, id: &GroupId) -> bool {
        self.groups.iter().any(|g| &g.id == id)
    }

    /// Exact-match channel name lookup within one group
    pub fn channel_name_taken(&self, group_id: &GroupId, name: &str) -> bool {
        self.channels
            .iter()
            .any(|c| &c.group_id == group_id && c.name == name)
    }

    pub fn channel_id_taken(&self, id: &ChannelId) -> bool {
        self.channels.iter().any(|c| &c.id == id)
    }

    /// Locate the General group by name or fixed id, creating it with the
    /// bootstrap shape if absent. Returns a mutable handle either way.
    pub fn ensure_general_group(&mut self) -> &mut Group {
        if let Some(pos) = self.groups.iter().position(|g| g.is_general()) {
            return &mut self.groups[pos];
        }
        self.groups.push(Group::general());
        self.groups.last_mut().expect("just pushed")
    }
}
