//! Notifications endpoints.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::AppResult;
use campus_db::entities::notification::{
    Model as NotificationModel, NotificationType, Severity,
};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// List notifications request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsRequest {
    /// Maximum results (default: 10, max: 100)
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Cursor for pagination (before this ID)
    #[serde(default)]
    pub until_id: Option<String>,
    /// Only unread notifications
    #[serde(default)]
    pub unread_only: bool,
}

const fn default_limit() -> u64 {
    10
}

/// Mark-read request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub notification_id: String,
}

/// Unread count response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub count: u64,
}

/// Marked count response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedCountResponse {
    pub marked: u64,
}

/// Notification response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub severity: String,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: String,
}

impl From<NotificationModel> for NotificationResponse {
    fn from(n: NotificationModel) -> Self {
        Self {
            id: n.id,
            notification_type: notification_type_to_string(n.notification_type),
            severity: severity_to_string(n.severity),
            title: n.title,
            message: n.message,
            data: n.data,
            is_read: n.is_read,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

fn notification_type_to_string(t: NotificationType) -> String {
    match t {
        NotificationType::PostRemoved => "postRemoved".to_string(),
        NotificationType::PostArchived => "postArchived".to_string(),
        NotificationType::PostRestored => "postRestored".to_string(),
        NotificationType::CommentAccepted => "commentAccepted".to_string(),
        NotificationType::CommentRejected => "commentRejected".to_string(),
        NotificationType::CommentPending => "commentPending".to_string(),
        NotificationType::AccountSuspended => "accountSuspended".to_string(),
        NotificationType::SuspensionLifted => "suspensionLifted".to_string(),
    }
}

fn severity_to_string(s: Severity) -> String {
    match s {
        Severity::Info => "info".to_string(),
        Severity::Success => "success".to_string(),
        Severity::Warning => "warning".to_string(),
    }
}

/// Get notifications for the authenticated user.
async fn list_notifications(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListNotificationsRequest>,
) -> AppResult<ApiResponse<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_service
        .get_notifications(
            &user.id,
            req.limit.min(100),
            req.until_id.as_deref(),
            req.unread_only,
        )
        .await?;

    Ok(ApiResponse::ok(
        notifications.into_iter().map(Into::into).collect(),
    ))
}

/// Mark a notification as read.
async fn mark_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MarkReadRequest>,
) -> AppResult<ApiResponse<UnreadCountResponse>> {
    state
        .notification_service
        .mark_as_read(&user.id, &req.notification_id)
        .await?;

    let count = state.notification_service.count_unread(&user.id).await?;

    Ok(ApiResponse::ok(UnreadCountResponse { count }))
}

/// Mark all notifications as read.
async fn mark_all_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<MarkedCountResponse>> {
    let marked = state.notification_service.mark_all_as_read(&user.id).await?;

    Ok(ApiResponse::ok(MarkedCountResponse { marked }))
}

/// Count unread notifications.
async fn unread_count(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UnreadCountResponse>> {
    let count = state.notification_service.count_unread(&user.id).await?;

    Ok(ApiResponse::ok(UnreadCountResponse { count }))
}

/// Create the notifications router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list_notifications))
        .route("/mark-read", post(mark_read))
        .route("/mark-all-read", post(mark_all_read))
        .route("/unread-count", post(unread_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_to_string() {
        assert_eq!(severity_to_string(Severity::Info), "info");
        assert_eq!(severity_to_string(Severity::Success), "success");
        assert_eq!(severity_to_string(Severity::Warning), "warning");
    }

    #[test]
    fn test_notification_type_to_string() {
        assert_eq!(
            notification_type_to_string(NotificationType::PostRestored),
            "postRestored"
        );
        assert_eq!(
            notification_type_to_string(NotificationType::AccountSuspended),
            "accountSuspended"
        );
    }
}
