//! Request/Response types for the HTTP API
//!
//! Wire field names are camelCase to match the persisted entities and the
//! client contract.

use parley_core::{Channel, Group, Role, User};
use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub requester: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRoleRequest {
    pub requester: String,
    /// Raw role string; validated by the directory so a missing target
    /// still wins over a malformed role
    pub role: String,
}

/// Body carrying only the acting username (delete endpoints)
#[derive(Debug, Clone, Deserialize)]
pub struct RequesterBody {
    pub requester: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub requester: String,
    pub name: String,
    pub admin_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    pub requester: String,
    pub group_id: String,
    pub name: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub success: bool,
    pub group: Group,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelResponse {
    pub success: bool,
    pub channel: Channel,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
