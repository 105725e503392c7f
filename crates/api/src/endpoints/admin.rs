//! Administrator management endpoints.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::AppResult;
use campus_db::entities::user::{self, Role};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// User response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    pub role: String,
    pub suspended_until: Option<String>,
    pub suspension_reason: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            display_name: u.display_name,
            role: role_to_string(u.role),
            suspended_until: u.suspended_until.map(|t| t.to_rfc3339()),
            suspension_reason: u.suspension_reason,
            created_at: u.created_at.to_rfc3339(),
            updated_at: u.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

pub(crate) fn role_to_string(role: Role) -> String {
    match role {
        Role::User => "user".to_string(),
        Role::Moderator => "moderator".to_string(),
        Role::Admin => "admin".to_string(),
        Role::Superadmin => "superadmin".to_string(),
    }
}

/// Search user by email request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchUserByEmailRequest {
    #[validate(email)]
    pub email: String,
}

/// Promote/demote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdRequest {
    pub user_id: String,
}

/// Search for a user by email.
async fn search_user_by_email(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SearchUserByEmailRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    req.validate()?;

    let found = state
        .admin_service
        .search_user_by_email(&user.id, &req.email)
        .await?;

    Ok(ApiResponse::ok(found.into()))
}

/// Grant the admin role.
async fn promote_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UserIdRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let promoted = state
        .admin_service
        .promote_user_to_admin(&user.id, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(promoted.into()))
}

/// Revoke the admin role (superadmin only).
async fn demote_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UserIdRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let demoted = state
        .admin_service
        .demote_user_from_admin(&user.id, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(demoted.into()))
}

/// List administrators.
async fn list_administrators(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let administrators = state.admin_service.list_administrators(&user.id).await?;

    Ok(ApiResponse::ok(
        administrators.into_iter().map(Into::into).collect(),
    ))
}

/// Create the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/search-by-email", post(search_user_by_email))
        .route("/users/promote", post(promote_user))
        .route("/users/demote", post(demote_user))
        .route("/administrators/list", post(list_administrators))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_to_string() {
        assert_eq!(role_to_string(Role::User), "user");
        assert_eq!(role_to_string(Role::Moderator), "moderator");
        assert_eq!(role_to_string(Role::Admin), "admin");
        assert_eq!(role_to_string(Role::Superadmin), "superadmin");
    }
}
