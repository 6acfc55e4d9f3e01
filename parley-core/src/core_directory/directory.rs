//! Directory service
//!
//! Owns the in-memory state and enforces every authorization and
//! referential-integrity rule: who may perform which mutation, how ids
//! are generated, and how deletions cascade.
//!
//! Concurrency model: the state is loaded once from the store and kept
//! behind an async mutex. Each mutation validates against the current
//! state, builds the next state, persists it, and only then swaps it in.
//! A failed save therefore changes nothing, on disk or in memory.

use super::model::{Channel, ChannelId, Group, GroupId, Role, State, User};
use super::store::{JsonStore, StoreError};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Errors produced by directory operations
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Requester lacks the privilege for the operation
    #[error("{0}")]
    Forbidden(String),

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// Malformed or missing input
    #[error("{0}")]
    InvalidInput(String),

    /// Semantically disallowed operation
    #[error("{0}")]
    InvalidOperation(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Persistence failure
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Result type for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Outcome of an authentication attempt. A credential mismatch is a
/// `valid: false` outcome, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct AuthOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// The directory service
pub struct Directory {
    store: JsonStore,
    state: Mutex<State>,
}

impl Directory {
    /// Load the persisted state and take ownership of it
    pub fn open(store: JsonStore) -> DirectoryResult<Self> {
        let state = store.load()?;
        info!(
            users = state.users.len(),
            groups = state.groups.len(),
            channels = state.channels.len(),
            "directory loaded"
        );
        Ok(Directory {
            store,
            state: Mutex::new(state),
        })
    }

    /// Check a username/password pair against the user roster
    pub async fn authenticate(&self, username: &str, password: &str) -> AuthOutcome {
        let state = self.state.lock().await;
        match state.users.iter().find(|u| u.matches(username, password)) {
            Some(user) => {
                info!(username, "user authenticated");
                AuthOutcome {
                    valid: true,
                    user: Some(user.clone()),
                }
            }
            None => {
                warn!(username, "authentication failed");
                AuthOutcome {
                    valid: false,
                    user: None,
                }
            }
        }
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.state.lock().await.users.clone()
    }

    pub async fn list_groups(&self) -> Vec<Group> {
        self.state.lock().await.groups.clone()
    }

    pub async fn list_channels(&self) -> Vec<Channel> {
        self.state.lock().await.channels.clone()
    }

    /// Create a user (superAdmin only) and enroll them in the General
    /// group, bootstrapping General if it does not exist yet.
    pub async fn create_user(
        &self,
        requester: &str,
        username: &str,
        password: &str,
        email: &str,
        role: Role,
    ) -> DirectoryResult<User> {
        let mut state = self.state.lock().await;

        if state.find_super_admin(requester).is_none() {
            return Err(DirectoryError::Forbidden(
                "Only super admin can add users.".to_string(),
            ));
        }
        if state.find_user(username).is_some() {
            return Err(DirectoryError::Conflict(
                "Username already exists.".to_string(),
            ));
        }

        let user = User::new(username, password, email, role);

        let mut next = state.clone();
        next.users.push(user.clone());
        next.ensure_general_group().add_member(username);

        self.store.save(&next)?;
        *state = next;

        info!(username, role = %user.role, "user created");
        Ok(user)
    }

    /// Change a user's role (superAdmin only; never the requester's own).
    /// The role string is validated only after the target is known to
    /// exist, so a missing target wins over a malformed role.
    pub async fn update_user_role(
        &self,
        requester: &str,
        target: &str,
        new_role: &str,
    ) -> DirectoryResult<User> {
        let mut state = self.state.lock().await;

        if state.find_super_admin(requester).is_none() {
            return Err(DirectoryError::Forbidden(
                "Only super admin can update user roles.".to_string(),
            ));
        }
        if target == requester {
            return Err(DirectoryError::InvalidOperation(
                "Super admin cannot change own role.".to_string(),
            ));
        }
        if state.find_user(target).is_none() {
            return Err(DirectoryError::NotFound("User not found.".to_string()));
        }
        let role = Role::parse(new_role)
            .ok_or_else(|| DirectoryError::InvalidInput("Invalid role.".to_string()))?;

        let mut next = state.clone();
        let user = next.find_user_mut(target).expect("target resolved above");
        user.role = role;
        let updated = user.clone();

        self.store.save(&next)?;
        *state = next;

        info!(username = target, role = %updated.role, "user role updated");
        Ok(updated)
    }

    /// Remove a user record (superAdmin only; never the requester's own).
    /// Group and channel member lists keep the deleted username.
    pub async fn delete_user(&self, requester: &str, target: &str) -> DirectoryResult<()> {
        let mut state = self.state.lock().await;

        if state.find_super_admin(requester).is_none() {
            return Err(DirectoryError::Forbidden(
                "Only super admin can delete users.".to_string(),
            ));
        }
        if target == requester {
            return Err(DirectoryError::InvalidOperation(
                "Super admin cannot delete self.".to_string(),
            ));
        }
        let Some(pos) = state.users.iter().position(|u| u.username == target) else {
            return Err(DirectoryError::NotFound("User not found.".to_string()));
        };

        let mut next = state.clone();
        next.users.remove(pos);

        self.store.save(&next)?;
        *state = next;

        info!(username = target, "user deleted");
        Ok(())
    }

    /// Create a group (superAdmin only). The requester becomes owner,
    /// leads the admin roster, and is the sole initial member.
    pub async fn create_group(
        &self,
        requester: &str,
        name: &str,
        admin_ids: Vec<String>,
    ) -> DirectoryResult<Group> {
        let mut state = self.state.lock().await;

        if state.find_super_admin(requester).is_none() {
            return Err(DirectoryError::Forbidden(
                "Only super admin can create groups.".to_string(),
            ));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(DirectoryError::InvalidInput(
                "Group name is required.".to_string(),
            ));
        }
        if state.group_name_taken(name) {
            return Err(DirectoryError::Conflict(
                "Group name already exists.".to_string(),
            ));
        }

        let id = Self::fresh_group_id(&state);
        let group = Group::new(id, name, requester, admin_ids);

        let mut next = state.clone();
        next.groups.push(group.clone());

        self.store.save(&next)?;
        *state = next;

        info!(group = %group.id, name = %group.name, "group created");
        Ok(group)
    }

    /// Delete a group (superAdmin only) and every channel it owns.
    /// The General group can never be deleted.
    pub async fn delete_group(&self, requester: &str, group_id: &GroupId) -> DirectoryResult<()> {
        let mut state = self.state.lock().await;

        if state.find_super_admin(requester).is_none() {
            return Err(DirectoryError::Forbidden(
                "Only super admin can delete groups.".to_string(),
            ));
        }
        let Some(group) = state.find_group(group_id) else {
            return Err(DirectoryError::NotFound("Group not found.".to_string()));
        };
        if group.is_general() {
            return Err(DirectoryError::InvalidOperation(
                "Cannot delete the General group.".to_string(),
            ));
        }

        let mut next = state.clone();
        next.channels.retain(|c| &c.group_id != group_id);
        next.groups.retain(|g| &g.id != group_id);

        self.store.save(&next)?;
        *state = next;

        info!(group = %group_id, "group deleted");
        Ok(())
    }

    /// Create a channel in a group. Allowed for superAdmins, and for
    /// groupAdmins listed in the group's admin roster.
    pub async fn create_channel(
        &self,
        requester: &str,
        group_id: &GroupId,
        name: &str,
    ) -> DirectoryResult<Channel> {
        let mut state = self.state.lock().await;

        let user = state.find_user(requester);
        let group = state.find_group(group_id);
        let (Some(user), Some(group)) = (user, group) else {
            return Err(DirectoryError::InvalidInput(
                "User or group not found.".to_string(),
            ));
        };
        let allowed = user.is_super_admin()
            || (user.role == Role::GroupAdmin && group.is_admin(&user.username));
        if !allowed {
            return Err(DirectoryError::Forbidden(
                "Only group/super admin can create channels.".to_string(),
            ));
        }
        if state.channel_name_taken(group_id, name) {
            return Err(DirectoryError::Conflict(
                "Channel name already exists.".to_string(),
            ));
        }

        let id = Self::fresh_channel_id(&state);
        // Membership is a snapshot of the group roster at creation time,
        // not a live view of it.
        let channel = Channel::new(id.clone(), group_id.clone(), name, group.member_ids.clone());

        let mut next = state.clone();
        next.channels.push(channel.clone());
        next.find_group_mut(group_id)
            .expect("group resolved above")
            .add_channel(id);

        self.store.save(&next)?;
        *state = next;

        info!(channel = %channel.id, group = %group_id, "channel created");
        Ok(channel)
    }

    /// Generate a group id unused by any existing group
    fn fresh_group_id(state: &State) -> GroupId {
        loop {
            let id = GroupId::generate();
            if !state.group_id_taken(&id) {
                return id;
            }
        }
    }

    /// Generate a channel id unused by any existing channel
    fn fresh_channel_id(state: &State) -> ChannelId {
        loop {
            let id = ChannelId::generate();
            if !state.channel_id_taken(&id) {
                return id;
            }
        }
    }
}
