//! HTTP API handlers
//!
//! One handler per endpoint. Handlers stay thin: extract the body, call
//! the directory, wrap the result in the contract's response shape.

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::*;
use axum::extract::{Path, State};
use axum::Json;
use parley_core::{AuthOutcome, Channel, Group, GroupId, User};
use std::sync::Arc;

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AuthRequest>,
) -> Json<AuthOutcome> {
    Json(state.directory.authenticate(&req.username, &req.password).await)
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/users
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    Json(state.directory.list_users().await)
}

/// POST /api/users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .directory
        .create_user(&req.requester, &req.username, &req.password, &req.email, req.role)
        .await?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// PUT /api/users/:username
pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Json(req): Json<UpdateUserRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .directory
        .update_user_role(&req.requester, &username, &req.role)
        .await?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// DELETE /api/users/:username
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Json(req): Json<RequesterBody>,
) -> ApiResult<Json<SuccessResponse>> {
    state.directory.delete_user(&req.requester, &username).await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================================
// Groups
// ============================================================================

/// GET /api/groups
pub async fn list_groups(State(state): State<Arc<AppState>>) -> Json<Vec<Group>> {
    Json(state.directory.list_groups().await)
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGroupRequest>,
) -> ApiResult<Json<GroupResponse>> {
    let group = state
        .directory
        .create_group(&req.requester, &req.name, req.admin_ids.unwrap_or_default())
        .await?;
    Ok(Json(GroupResponse {
        success: true,
        group,
    }))
}

/// DELETE /api/groups/:groupId
pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
    Json(req): Json<RequesterBody>,
) -> ApiResult<Json<SuccessResponse>> {
    state
        .directory
        .delete_group(&req.requester, &GroupId::new(group_id))
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================================
// Channels
// ============================================================================

/// GET /api/channels
pub async fn list_channels(State(state): State<Arc<AppState>>) -> Json<Vec<Channel>> {
    Json(state.directory.list_channels().await)
}

/// POST /api/channels
pub async fn create_channel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateChannelRequest>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel = state
        .directory
        .create_channel(&req.requester, &GroupId::new(req.group_id), &req.name)
        .await?;
    Ok(Json(ChannelResponse {
        success: true,
        channel,
    }))
}
