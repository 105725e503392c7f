//! Moderation notification service.
//!
//! Owns the append-only notification writes that follow every content or
//! suspension transition. Creation happens strictly after the primary
//! mutation has been persisted; the call sites catch and log failures so a
//! broken notification write never alters the primary operation's outcome.

use campus_common::{AppResult, IdGenerator};
use campus_db::{
    entities::{
        comment,
        notification::{self, NotificationType, Severity},
    },
    repositories::NotificationRepository,
};
use chrono::{DateTime, Utc};
use sea_orm::Set;

/// Copy and severity for a comment review decision.
const fn comment_notification_parts(
    status: comment::CommentStatus,
) -> (NotificationType, Severity, &'static str, &'static str) {
    match status {
        comment::CommentStatus::Accepted => (
            NotificationType::CommentAccepted,
            Severity::Success,
            "Comment approved",
            "Your comment was approved and is now visible.",
        ),
        comment::CommentStatus::Rejected => (
            NotificationType::CommentRejected,
            Severity::Warning,
            "Comment rejected",
            "Your comment was rejected by a moderator.",
        ),
        comment::CommentStatus::Pending => (
            NotificationType::CommentPending,
            Severity::Info,
            "Comment pending review",
            "Your comment was moved back to review.",
        ),
    }
}

/// Notification service for moderation side effects and recipient queries.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    id_gen: IdGenerator,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(notification_repo: NotificationRepository) -> Self {
        Self {
            notification_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Notify a post's author that the post was removed.
    pub async fn notify_post_removed(
        &self,
        author_id: &str,
        moderator_id: &str,
        post_id: &str,
    ) -> AppResult<notification::Model> {
        self.create_internal(
            author_id,
            NotificationType::PostRemoved,
            Severity::Warning,
            "Post removed",
            "Your post was removed by a moderator.",
            serde_json::json!({
                "contentId": post_id,
                "contentType": "post",
                "moderatorId": moderator_id,
            }),
        )
        .await
    }

    /// Notify a post's author that the post was archived.
    pub async fn notify_post_archived(
        &self,
        author_id: &str,
        moderator_id: &str,
        post_id: &str,
    ) -> AppResult<notification::Model> {
        self.create_internal(
            author_id,
            NotificationType::PostArchived,
            Severity::Warning,
            "Post archived",
            "Your post was archived by a moderator.",
            serde_json::json!({
                "contentId": post_id,
                "contentType": "post",
                "moderatorId": moderator_id,
            }),
        )
        .await
    }

    /// Notify a post's author that the post was restored.
    ///
    /// Restore is the only publish transition that notifies; a generic
    /// status change to published stays silent.
    pub async fn notify_post_restored(
        &self,
        author_id: &str,
        moderator_id: &str,
        post_id: &str,
    ) -> AppResult<notification::Model> {
        self.create_internal(
            author_id,
            NotificationType::PostRestored,
            Severity::Success,
            "Post restored",
            "Your post was restored and is visible again.",
            serde_json::json!({
                "contentId": post_id,
                "contentType": "post",
                "moderatorId": moderator_id,
            }),
        )
        .await
    }

    /// Notify a comment's author about a review decision.
    pub async fn notify_comment_status(
        &self,
        author_id: &str,
        moderator_id: &str,
        comment_id: &str,
        status: comment::CommentStatus,
    ) -> AppResult<notification::Model> {
        let (notification_type, severity, title, message) = comment_notification_parts(status);

        self.create_internal(
            author_id,
            notification_type,
            severity,
            title,
            message,
            serde_json::json!({
                "contentId": comment_id,
                "contentType": "comment",
                "moderatorId": moderator_id,
            }),
        )
        .await
    }

    /// Notify a user that their account was suspended.
    pub async fn notify_account_suspended(
        &self,
        user_id: &str,
        moderator_id: &str,
        duration_hours: i64,
        reason: &str,
        until: DateTime<Utc>,
    ) -> AppResult<notification::Model> {
        let message = if reason.is_empty() {
            format!("Your account has been suspended for {duration_hours} hours.")
        } else {
            format!("Your account has been suspended for {duration_hours} hours. Reason: {reason}")
        };

        self.create_internal(
            user_id,
            NotificationType::AccountSuspended,
            Severity::Warning,
            "Account suspended",
            &message,
            serde_json::json!({
                "moderatorId": moderator_id,
                "reason": reason,
                "suspendedUntil": until.to_rfc3339(),
            }),
        )
        .await
    }

    /// Notify a user that their suspension was lifted.
    pub async fn notify_suspension_lifted(
        &self,
        user_id: &str,
        moderator_id: &str,
    ) -> AppResult<notification::Model> {
        self.create_internal(
            user_id,
            NotificationType::SuspensionLifted,
            Severity::Success,
            "Suspension lifted",
            "Your account suspension has been lifted.",
            serde_json::json!({
                "moderatorId": moderator_id,
            }),
        )
        .await
    }

    /// Internal helper to create notifications.
    async fn create_internal(
        &self,
        user_id: &str,
        notification_type: NotificationType,
        severity: Severity,
        title: &str,
        message: &str,
        data: serde_json::Value,
    ) -> AppResult<notification::Model> {
        let model = notification::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            notification_type: Set(notification_type),
            severity: Set(severity),
            title: Set(title.to_string()),
            message: Set(message.to_string()),
            data: Set(Some(data)),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.notification_repo.create(model).await
    }

    /// Get notifications for a user.
    pub async fn get_notifications(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
        unread_only: bool,
    ) -> AppResult<Vec<notification::Model>> {
        self.notification_repo
            .find_by_user(user_id, limit, until_id, unread_only)
            .await
    }

    /// Mark a notification as read.
    pub async fn mark_as_read(&self, user_id: &str, notification_id: &str) -> AppResult<()> {
        // Verify the notification belongs to the user
        let notification = self.notification_repo.find_by_id(notification_id).await?;
        if let Some(n) = notification
            && n.user_id == user_id
        {
            self.notification_repo.mark_as_read(notification_id).await?;
        }
        Ok(())
    }

    /// Mark all notifications as read for a user.
    pub async fn mark_all_as_read(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.mark_all_as_read(user_id).await
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.count_unread(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_common::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[test]
    fn test_comment_severity_mapping() {
        let (kind, severity, _, _) =
            comment_notification_parts(comment::CommentStatus::Accepted);
        assert_eq!(kind, NotificationType::CommentAccepted);
        assert_eq!(severity, Severity::Success);

        let (kind, severity, _, _) =
            comment_notification_parts(comment::CommentStatus::Rejected);
        assert_eq!(kind, NotificationType::CommentRejected);
        assert_eq!(severity, Severity::Warning);

        let (kind, severity, _, _) =
            comment_notification_parts(comment::CommentStatus::Pending);
        assert_eq!(kind, NotificationType::CommentPending);
        assert_eq!(severity, Severity::Info);
    }

    #[tokio::test]
    async fn test_create_failure_surfaces_as_database_error() {
        // The caller (moderation/suspension services) is responsible for
        // swallowing this; the service itself reports it.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([sea_orm::DbErr::Custom("connection reset".to_string())])
                .into_connection(),
        );
        let service = NotificationService::new(NotificationRepository::new(db));

        let result = service.notify_post_removed("author1", "mod1", "post1").await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
