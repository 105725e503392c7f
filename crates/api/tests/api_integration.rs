//! API integration tests.
//!
//! These tests drive the router end to end over a mock database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use campus_api::{middleware::AppState, router as api_router};
use campus_core::{
    AccountService, AdminService, AuthorizationService, ModerationService, NotificationService,
    SuspensionService,
};
use campus_db::entities::{comment, user};
use campus_db::repositories::{
    CommentRepository, NotificationRepository, PostRepository, ReportRepository, UserRepository,
};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_user(id: &str, role: user::Role) -> user::Model {
    user::Model {
        id: id.to_string(),
        email: format!("{id}@example.edu"),
        username: id.to_string(),
        display_name: None,
        role,
        suspended_until: None,
        suspension_reason: None,
        token: Some(format!("token-{id}")),
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

fn create_test_comment(id: &str, status: comment::CommentStatus) -> comment::Model {
    comment::Model {
        id: id.to_string(),
        post_id: "post1".to_string(),
        user_id: "author1".to_string(),
        content: "Looks right to me".to_string(),
        status,
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

/// Build the app the way the server binary wires it.
fn create_app(db: Arc<DatabaseConnection>) -> Router {
    let user_repo = UserRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));
    let report_repo = ReportRepository::new(Arc::clone(&db));
    let notification_repo = NotificationRepository::new(Arc::clone(&db));

    let authz = AuthorizationService::new(user_repo.clone());
    let notification_service = NotificationService::new(notification_repo);

    let state = AppState {
        account_service: AccountService::new(user_repo.clone()),
        moderation_service: ModerationService::new(
            post_repo,
            comment_repo,
            report_repo,
            user_repo.clone(),
            authz.clone(),
            notification_service.clone(),
        ),
        suspension_service: SuspensionService::new(
            user_repo.clone(),
            authz.clone(),
            notification_service.clone(),
        ),
        admin_service: AdminService::new(user_repo, authz),
        notification_service,
    };

    Router::new()
        .nest("/api", api_router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            campus_api::middleware::auth_middleware,
        ))
        .with_state(state)
}

fn json_request(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_unauthenticated_request_is_rejected() {
    let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let app = create_app(db);

    let response = app
        .oneshot(json_request("/api/moderation/posts/list", None, "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_plain_user_is_forbidden() {
    // Query order: token resolution, then the guard's role re-resolution.
    let caller = create_test_user("u1", user::Role::User);
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[caller.clone()]])
            .append_query_results([[caller]])
            .into_connection(),
    );
    let app = create_app(db);

    let response = app
        .oneshot(json_request(
            "/api/moderation/posts/list",
            Some("token-u1"),
            "{}",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_moderator_lists_comments() {
    let moderator = create_test_user("mod1", user::Role::Moderator);
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[moderator.clone()]])
            .append_query_results([[moderator]])
            .append_query_results([[create_test_comment("c1", comment::CommentStatus::Pending)]])
            .into_connection(),
    );
    let app = create_app(db);

    let response = app
        .oneshot(json_request(
            "/api/moderation/comments/list",
            Some("token-mod1"),
            r#"{"status":["pending"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["data"][0]["id"], "c1");
    assert_eq!(parsed["data"][0]["status"], "pending");
}

#[tokio::test]
async fn test_moderator_cannot_suspend_superadmin() {
    // Token resolution, guard re-resolution, then the protected target.
    let moderator = create_test_user("mod1", user::Role::Moderator);
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[moderator.clone()]])
            .append_query_results([[moderator]])
            .append_query_results([[create_test_user("root", user::Role::Superadmin)]])
            .into_connection(),
    );
    let app = create_app(db);

    let response = app
        .oneshot(json_request(
            "/api/moderation/suspend-user",
            Some("token-mod1"),
            r#"{"userId":"root","durationHours":24,"reason":"test"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_status_is_bad_request() {
    let moderator = create_test_user("mod1", user::Role::Moderator);
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[moderator]])
            .into_connection(),
    );
    let app = create_app(db);

    let response = app
        .oneshot(json_request(
            "/api/moderation/posts/update-status",
            Some("token-mod1"),
            r#"{"postId":"post1","status":"draft"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
