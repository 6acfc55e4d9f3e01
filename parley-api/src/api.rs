//! API routes definition

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Auth
        .route("/api/auth", post(handlers::authenticate))
        // Users
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/users/:username",
            put(handlers::update_user_role).delete(handlers::delete_user),
        )
        // Groups
        .route(
            "/api/groups",
            get(handlers::list_groups).post(handlers::create_group),
        )
        .route("/api/groups/:groupId", delete(handlers::delete_group))
        // Channels
        .route(
            "/api/channels",
            get(handlers::list_channels).post(handlers::create_channel),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use parley_core::{Directory, Group, JsonStore, Role, State, User};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    /// Router over a directory seeded with superAdmin "super", plain user
    /// "bob", and the General group holding both.
    fn test_router() -> (Router, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));

        let mut state = State::default();
        state.users.push(User::new(
            "super",
            "123",
            "super@example.com",
            Role::SuperAdmin,
        ));
        state
            .users
            .push(User::new("bob", "456", "bob@example.com", Role::User));
        let mut general = Group::general();
        general.add_member("super");
        general.add_member("bob");
        state.groups.push(general);
        store.save(&state).unwrap();

        let directory = std::sync::Arc::new(Directory::open(store).unwrap());
        let router = build_router(Arc::new(AppState::new(directory)));
        (router, dir)
    }

    async fn send(router: Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn test_auth_valid_and_invalid() {
        let (router, _dir) = test_router();

        let (status, body) = send(
            router.clone(),
            Method::POST,
            "/api/auth",
            json!({"username": "super", "password": "123"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["user"]["username"], "super");
        assert_eq!(body["user"]["role"], "superAdmin");

        let (status, body) = send(
            router,
            Method::POST,
            "/api/auth",
            json!({"username": "super", "password": "nope"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert!(body.get("user").is_none());
    }

    #[tokio::test]
    async fn test_list_users() {
        let (router, _dir) = test_router();
        let (status, body) = get_json(router, "/api/users").await;
        assert_eq!(status, StatusCode::OK);
        let users = body.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["username"], "super");
    }

    #[tokio::test]
    async fn test_create_user_forbidden_for_non_super_admin() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router,
            Method::POST,
            "/api/users",
            json!({
                "requester": "bob",
                "username": "carol",
                "password": "pw",
                "email": "carol@example.com",
                "role": "user"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Only super admin can add users.");
    }

    #[tokio::test]
    async fn test_create_user_success_and_general_enrollment() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router.clone(),
            Method::POST,
            "/api/users",
            json!({
                "requester": "super",
                "username": "carol",
                "password": "pw",
                "email": "carol@example.com",
                "role": "groupAdmin"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["username"], "carol");
        assert_eq!(body["user"]["role"], "groupAdmin");

        let (_, groups) = get_json(router, "/api/groups").await;
        let general = &groups.as_array().unwrap()[0];
        let members = general["memberIds"].as_array().unwrap();
        assert_eq!(members.iter().filter(|m| *m == "carol").count(), 1);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_is_bad_request() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router,
            Method::POST,
            "/api/users",
            json!({
                "requester": "super",
                "username": "bob",
                "password": "pw",
                "email": "bob@example.com",
                "role": "user"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username already exists.");
    }

    #[tokio::test]
    async fn test_update_own_role_is_bad_request() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router,
            Method::PUT,
            "/api/users/super",
            json!({"requester": "super", "role": "user"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Super admin cannot change own role.");
    }

    #[tokio::test]
    async fn test_update_role_unknown_user_is_not_found() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router,
            Method::PUT,
            "/api/users/ghost",
            json!({"requester": "super", "role": "user"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found.");
    }

    #[tokio::test]
    async fn test_update_role_success() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router,
            Method::PUT,
            "/api/users/bob",
            json!({"requester": "super", "role": "groupAdmin"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["role"], "groupAdmin");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router.clone(),
            Method::DELETE,
            "/api/users/bob",
            json!({"requester": "super"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (_, users) = get_json(router, "/api/users").await;
        assert_eq!(users.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_group_success_shape() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router,
            Method::POST,
            "/api/groups",
            json!({"requester": "super", "name": "Eng"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let group = &body["group"];
        let id = group["id"].as_str().unwrap();
        assert_eq!(id.len(), 7);
        assert!(id.starts_with('g'));
        assert!(id[1..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(group["ownerId"], "super");
        assert_eq!(group["adminIds"], json!(["super"]));
        assert_eq!(group["memberIds"], json!(["super"]));
        assert_eq!(group["channelIds"], json!([]));
    }

    #[tokio::test]
    async fn test_create_group_forbidden_for_plain_user() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router,
            Method::POST,
            "/api/groups",
            json!({"requester": "bob", "name": "Eng"}),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Only super admin can create groups.");
    }

    #[tokio::test]
    async fn test_delete_general_group_is_bad_request() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router,
            Method::DELETE,
            "/api/groups/g1",
            json!({"requester": "super"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Cannot delete the General group.");
    }

    #[tokio::test]
    async fn test_delete_group_cascades_channels() {
        let (router, _dir) = test_router();
        let (_, body) = send(
            router.clone(),
            Method::POST,
            "/api/groups",
            json!({"requester": "super", "name": "Eng"}),
        )
        .await;
        let group_id = body["group"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            router.clone(),
            Method::POST,
            "/api/channels",
            json!({"requester": "super", "groupId": group_id, "name": "random"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            router.clone(),
            Method::DELETE,
            &format!("/api/groups/{}", group_id),
            json!({"requester": "super"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, channels) = get_json(router, "/api/channels").await;
        assert_eq!(channels.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_create_channel_forbidden_for_plain_user() {
        let (router, _dir) = test_router();
        let (_, body) = send(
            router.clone(),
            Method::POST,
            "/api/groups",
            json!({"requester": "super", "name": "Eng"}),
        )
        .await;
        let group_id = body["group"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            router,
            Method::POST,
            "/api/channels",
            json!({"requester": "bob", "groupId": group_id, "name": "random"}),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Only group/super admin can create channels.");
    }

    #[tokio::test]
    async fn test_create_channel_unknown_group_is_bad_request() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            router,
            Method::POST,
            "/api/channels",
            json!({"requester": "super", "groupId": "gzzzzzz", "name": "random"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User or group not found.");
    }

    #[tokio::test]
    async fn test_create_channel_duplicate_name_is_bad_request() {
        let (router, _dir) = test_router();
        let (_, body) = send(
            router.clone(),
            Method::POST,
            "/api/groups",
            json!({"requester": "super", "name": "Eng"}),
        )
        .await;
        let group_id = body["group"]["id"].as_str().unwrap().to_string();

        let channel = json!({"requester": "super", "groupId": group_id, "name": "random"});
        let (status, body) = send(router.clone(), Method::POST, "/api/channels", channel.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["channel"]["groupId"], group_id);
        assert_eq!(body["channel"]["memberIds"], json!(["super"]));

        let (status, body) = send(router, Method::POST, "/api/channels", channel).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Channel name already exists.");
    }
}
