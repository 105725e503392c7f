//! Moderation endpoints.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_core::{SuspendUserInput, SuspensionStatus};
use campus_db::entities::{
    comment::{self, CommentStatus},
    post::{self, PostStatus},
};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<post::Model> for PostResponse {
    fn from(p: post::Model) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            title: p.title,
            content: p.content,
            status: post_status_to_string(p.status),
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Comment response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<comment::Model> for CommentResponse {
    fn from(c: comment::Model) -> Self {
        Self {
            id: c.id,
            post_id: c.post_id,
            user_id: c.user_id,
            content: c.content,
            status: comment_status_to_string(c.status),
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Suspension status response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspensionStatusResponse {
    pub is_suspended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspension_reason: Option<String>,
}

impl From<SuspensionStatus> for SuspensionStatusResponse {
    fn from(s: SuspensionStatus) -> Self {
        Self {
            is_suspended: s.is_suspended,
            suspended_until: s.suspended_until.map(|t| t.to_rfc3339()),
            suspension_reason: s.suspension_reason,
        }
    }
}

/// Moderation stats response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationStatsResponse {
    pub pending_reports: u64,
    pub suspended_users: u64,
}

/// List posts request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsRequest {
    /// Allowed statuses; absent = all.
    #[serde(default)]
    pub status: Option<Vec<String>>,
    /// Filter by author.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Cursor returned by the previous page.
    #[serde(default)]
    pub last_id: Option<String>,
}

const fn default_limit() -> u64 {
    10
}

/// List posts response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsResponse {
    pub posts: Vec<PostResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_id: Option<String>,
}

/// Update post status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostStatusRequest {
    pub post_id: String,
    pub status: String,
}

/// Restore post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestorePostRequest {
    pub post_id: String,
}

/// List comments request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsRequest {
    #[serde(default)]
    pub status: Option<Vec<String>>,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Update comment status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentStatusRequest {
    pub comment_id: String,
    pub status: String,
}

/// Suspend user request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendUserRequest {
    pub user_id: String,
    pub duration_hours: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Unsuspend user request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsuspendUserRequest {
    pub user_id: String,
}

/// Suspension status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspensionStatusRequest {
    pub user_id: String,
}

fn post_status_to_string(status: PostStatus) -> String {
    match status {
        PostStatus::Published => "published".to_string(),
        PostStatus::Archived => "archived".to_string(),
        PostStatus::Deleted => "deleted".to_string(),
    }
}

fn parse_post_status(value: &str) -> AppResult<PostStatus> {
    match value {
        "published" => Ok(PostStatus::Published),
        "archived" => Ok(PostStatus::Archived),
        "deleted" => Ok(PostStatus::Deleted),
        other => Err(AppError::BadRequest(format!("Invalid post status: {other}"))),
    }
}

fn comment_status_to_string(status: CommentStatus) -> String {
    match status {
        CommentStatus::Pending => "pending".to_string(),
        CommentStatus::Accepted => "accepted".to_string(),
        CommentStatus::Rejected => "rejected".to_string(),
    }
}

fn parse_comment_status(value: &str) -> AppResult<CommentStatus> {
    match value {
        "pending" => Ok(CommentStatus::Pending),
        "accepted" => Ok(CommentStatus::Accepted),
        "rejected" => Ok(CommentStatus::Rejected),
        other => Err(AppError::BadRequest(format!(
            "Invalid comment status: {other}"
        ))),
    }
}

fn parse_post_statuses(values: Option<&Vec<String>>) -> AppResult<Vec<PostStatus>> {
    values
        .map(|v| v.iter().map(|s| parse_post_status(s)).collect())
        .unwrap_or_else(|| Ok(Vec::new()))
}

fn parse_comment_statuses(values: Option<&Vec<String>>) -> AppResult<Vec<CommentStatus>> {
    values
        .map(|v| v.iter().map(|s| parse_comment_status(s)).collect())
        .unwrap_or_else(|| Ok(Vec::new()))
}

// ========== Post Endpoints ==========

/// List posts for the moderation queue.
async fn list_posts(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListPostsRequest>,
) -> AppResult<ApiResponse<ListPostsResponse>> {
    let statuses = parse_post_statuses(req.status.as_ref())?;

    let page = state
        .moderation_service
        .list_posts_for_moderation(
            &user.id,
            &statuses,
            req.user_id.as_deref(),
            req.limit,
            req.last_id.as_deref(),
        )
        .await?;

    Ok(ApiResponse::ok(ListPostsResponse {
        posts: page.posts.into_iter().map(Into::into).collect(),
        last_id: page.last_id,
    }))
}

/// Set a post's status.
async fn update_post_status(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdatePostStatusRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let status = parse_post_status(&req.status)?;

    let updated = state
        .moderation_service
        .update_post_status(&user.id, &req.post_id, status)
        .await?;

    Ok(ApiResponse::ok(updated.into()))
}

/// Restore a post to published.
async fn restore_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<RestorePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let restored = state
        .moderation_service
        .restore_post(&user.id, &req.post_id)
        .await?;

    Ok(ApiResponse::ok(restored.into()))
}

// ========== Comment Endpoints ==========

/// List comments for the moderation queue.
async fn list_comments(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListCommentsRequest>,
) -> AppResult<ApiResponse<Vec<CommentResponse>>> {
    let statuses = parse_comment_statuses(req.status.as_ref())?;

    let comments = state
        .moderation_service
        .list_comments_for_moderation(
            &user.id,
            &statuses,
            req.post_id.as_deref(),
            req.user_id.as_deref(),
        )
        .await?;

    Ok(ApiResponse::ok(
        comments.into_iter().map(Into::into).collect(),
    ))
}

/// Set a comment's status.
async fn update_comment_status(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateCommentStatusRequest>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let status = parse_comment_status(&req.status)?;

    let updated = state
        .moderation_service
        .update_comment_status(&user.id, &req.comment_id, status)
        .await?;

    Ok(ApiResponse::ok(updated.into()))
}

// ========== Suspension Endpoints ==========

/// Suspend a user.
async fn suspend_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SuspendUserRequest>,
) -> AppResult<ApiResponse<SuspensionStatusResponse>> {
    let updated = state
        .suspension_service
        .suspend_user(
            &user.id,
            SuspendUserInput {
                user_id: req.user_id,
                duration_hours: req.duration_hours,
                reason: req.reason,
            },
        )
        .await?;

    Ok(ApiResponse::ok(
        SuspensionStatus::derive(&updated, chrono::Utc::now()).into(),
    ))
}

/// Lift a user's suspension.
async fn unsuspend_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UnsuspendUserRequest>,
) -> AppResult<ApiResponse<SuspensionStatusResponse>> {
    let updated = state
        .suspension_service
        .remove_user_suspension(&user.id, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(
        SuspensionStatus::derive(&updated, chrono::Utc::now()).into(),
    ))
}

/// Query a user's suspension status.
async fn suspension_status(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SuspensionStatusRequest>,
) -> AppResult<ApiResponse<SuspensionStatusResponse>> {
    let status = state.suspension_service.check_suspension(&req.user_id).await?;

    Ok(ApiResponse::ok(status.into()))
}

// ========== Dashboard ==========

/// Moderation dashboard counters.
async fn moderation_stats(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ModerationStatsResponse>> {
    let stats = state.moderation_service.moderation_stats(&user.id).await?;

    Ok(ApiResponse::ok(ModerationStatsResponse {
        pending_reports: stats.pending_reports,
        suspended_users: stats.suspended_users,
    }))
}

/// Create the moderation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts/list", post(list_posts))
        .route("/posts/update-status", post(update_post_status))
        .route("/posts/restore", post(restore_post))
        .route("/comments/list", post(list_comments))
        .route("/comments/update-status", post(update_comment_status))
        .route("/suspend-user", post(suspend_user))
        .route("/unsuspend-user", post(unsuspend_user))
        .route("/suspension-status", post(suspension_status))
        .route("/stats", post(moderation_stats))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post_status() {
        assert!(matches!(
            parse_post_status("published"),
            Ok(PostStatus::Published)
        ));
        assert!(matches!(
            parse_post_status("archived"),
            Ok(PostStatus::Archived)
        ));
        assert!(matches!(parse_post_status("deleted"), Ok(PostStatus::Deleted)));
        assert!(parse_post_status("draft").is_err());
    }

    #[test]
    fn test_parse_comment_statuses_rejects_unknown() {
        let values = vec!["pending".to_string(), "bogus".to_string()];
        assert!(parse_comment_statuses(Some(&values)).is_err());
    }

    #[test]
    fn test_parse_statuses_absent_means_all() {
        assert!(parse_post_statuses(None).unwrap().is_empty());
    }
}
