//! Moderation service: content lifecycle transitions and queue listings.

use campus_common::{AppError, AppResult};
use campus_db::{
    entities::{
        comment::{self, CommentStatus},
        post::{self, PostStatus},
    },
    repositories::{CommentRepository, PostRepository, ReportRepository, UserRepository},
};
use sea_orm::Set;

use crate::services::{AuthorizationService, NotificationService};

/// One page of the post moderation queue.
#[derive(Debug, Clone)]
pub struct PostModerationPage {
    /// Posts in creation-time-descending order.
    pub posts: Vec<post::Model>,
    /// Cursor for the next page; `None` when this page was empty.
    pub last_id: Option<String>,
}

/// Counters shown on the moderation dashboard.
#[derive(Debug, Clone, Copy)]
pub struct ModerationStats {
    /// Reports awaiting review.
    pub pending_reports: u64,
    /// Accounts inside an active suspension window.
    pub suspended_users: u64,
}

/// Moderation service for content status transitions.
#[derive(Clone)]
pub struct ModerationService {
    post_repo: PostRepository,
    comment_repo: CommentRepository,
    report_repo: ReportRepository,
    user_repo: UserRepository,
    authz: AuthorizationService,
    notifications: NotificationService,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        comment_repo: CommentRepository,
        report_repo: ReportRepository,
        user_repo: UserRepository,
        authz: AuthorizationService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            post_repo,
            comment_repo,
            report_repo,
            user_repo,
            authz,
            notifications,
        }
    }

    // ========== Posts ==========

    /// Set a post's status.
    ///
    /// No transition guard: any status may be written over any other, and
    /// writing the current status is a no-op write rather than an error.
    /// Deletion and archival notify the author; a generic transition to
    /// published does not (see [`Self::restore_post`]).
    pub async fn update_post_status(
        &self,
        moderator_id: &str,
        post_id: &str,
        status: PostStatus,
    ) -> AppResult<post::Model> {
        let moderator = self.authz.require_moderator(moderator_id).await?;
        let updated = self.apply_post_status(post_id, status).await?;

        match status {
            PostStatus::Deleted => {
                if let Err(e) = self
                    .notifications
                    .notify_post_removed(&updated.user_id, &moderator.id, &updated.id)
                    .await
                {
                    tracing::warn!(error = %e, post_id = %updated.id, "Failed to dispatch removal notification");
                }
            }
            PostStatus::Archived => {
                if let Err(e) = self
                    .notifications
                    .notify_post_archived(&updated.user_id, &moderator.id, &updated.id)
                    .await
                {
                    tracing::warn!(error = %e, post_id = %updated.id, "Failed to dispatch archival notification");
                }
            }
            PostStatus::Published => {}
        }

        Ok(updated)
    }

    /// Restore a post to published, from any status.
    ///
    /// Distinct from a generic status change to published: restore always
    /// notifies the author.
    pub async fn restore_post(&self, moderator_id: &str, post_id: &str) -> AppResult<post::Model> {
        let moderator = self.authz.require_moderator(moderator_id).await?;
        let updated = self.apply_post_status(post_id, PostStatus::Published).await?;

        if let Err(e) = self
            .notifications
            .notify_post_restored(&updated.user_id, &moderator.id, &updated.id)
            .await
        {
            tracing::warn!(error = %e, post_id = %updated.id, "Failed to dispatch restore notification");
        }

        Ok(updated)
    }

    /// Persist a post status change. Shared by the generic and restore paths.
    async fn apply_post_status(&self, post_id: &str, status: PostStatus) -> AppResult<post::Model> {
        if post_id.is_empty() {
            return Err(AppError::BadRequest("A post id is required".to_string()));
        }

        let post = self.post_repo.get_by_id(post_id).await?;

        let mut model: post::ActiveModel = post.into();
        model.status = Set(status);
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.post_repo.update(model).await
    }

    /// Get posts for the moderation queue.
    ///
    /// `statuses` is an allow-set (empty = all); `until_id` is the cursor
    /// returned by the previous page. Pages are only stable under the fixed
    /// id-descending order; concurrent inserts ahead of the cursor can skip
    /// or duplicate rows, which is accepted.
    pub async fn list_posts_for_moderation(
        &self,
        moderator_id: &str,
        statuses: &[PostStatus],
        author_id: Option<&str>,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<PostModerationPage> {
        self.authz.require_moderator(moderator_id).await?;

        let posts = self
            .post_repo
            .find_for_moderation(statuses, author_id, limit.min(100), until_id)
            .await?;

        let last_id = posts.last().map(|p| p.id.clone());

        Ok(PostModerationPage { posts, last_id })
    }

    // ========== Comments ==========

    /// Set a comment's status. Every transition notifies the author.
    pub async fn update_comment_status(
        &self,
        moderator_id: &str,
        comment_id: &str,
        status: CommentStatus,
    ) -> AppResult<comment::Model> {
        let moderator = self.authz.require_moderator(moderator_id).await?;

        if comment_id.is_empty() {
            return Err(AppError::BadRequest("A comment id is required".to_string()));
        }

        let comment = self.comment_repo.get_by_id(comment_id).await?;

        let mut model: comment::ActiveModel = comment.into();
        model.status = Set(status);
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.comment_repo.update(model).await?;

        if let Err(e) = self
            .notifications
            .notify_comment_status(&updated.user_id, &moderator.id, &updated.id, status)
            .await
        {
            tracing::warn!(error = %e, comment_id = %updated.id, "Failed to dispatch comment review notification");
        }

        Ok(updated)
    }

    /// Get comments for the moderation queue (newest first).
    pub async fn list_comments_for_moderation(
        &self,
        moderator_id: &str,
        statuses: &[CommentStatus],
        post_id: Option<&str>,
        author_id: Option<&str>,
    ) -> AppResult<Vec<comment::Model>> {
        self.authz.require_moderator(moderator_id).await?;

        self.comment_repo
            .find_for_moderation(statuses, post_id, author_id)
            .await
    }

    // ========== Dashboard ==========

    /// Counters for the moderation dashboard.
    pub async fn moderation_stats(&self, moderator_id: &str) -> AppResult<ModerationStats> {
        self.authz.require_moderator(moderator_id).await?;

        let pending_reports = self.report_repo.count_pending().await?;
        let suspended_users = self.user_repo.count_suspended().await?;

        Ok(ModerationStats {
            pending_reports,
            suspended_users,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_db::entities::user;
    use campus_db::repositories::NotificationRepository;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, role: user::Role) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: format!("{id}@example.edu"),
            username: id.to_string(),
            display_name: None,
            role,
            suspended_until: None,
            suspension_reason: None,
            token: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_post(id: &str, status: PostStatus) -> post::Model {
        post::Model {
            id: id.to_string(),
            user_id: "author1".to_string(),
            title: "Office hours".to_string(),
            content: "Thursdays at 4pm.".to_string(),
            status,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_on(db: &Arc<DatabaseConnection>) -> ModerationService {
        ModerationService::new(
            PostRepository::new(Arc::clone(db)),
            CommentRepository::new(Arc::clone(db)),
            ReportRepository::new(Arc::clone(db)),
            UserRepository::new(Arc::clone(db)),
            AuthorizationService::new(UserRepository::new(Arc::clone(db))),
            NotificationService::new(NotificationRepository::new(Arc::clone(db))),
        )
    }

    #[tokio::test]
    async fn test_update_post_status_denies_plain_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u1", user::Role::User)]])
                .into_connection(),
        );
        let service = service_on(&db);

        let result = service
            .update_post_status("u1", "post1", PostStatus::Deleted)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_post_status_missing_post() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("mod1", user::Role::Moderator)]])
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );
        let service = service_on(&db);

        let result = service
            .update_post_status("mod1", "ghost", PostStatus::Deleted)
            .await;

        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_post_status_empty_id() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("mod1", user::Role::Moderator)]])
                .into_connection(),
        );
        let service = service_on(&db);

        let result = service
            .update_post_status("mod1", "", PostStatus::Deleted)
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_transition() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("mod1", user::Role::Moderator)]])
                .append_query_results([[create_test_post("post1", PostStatus::Published)]])
                .append_query_results([[create_test_post("post1", PostStatus::Deleted)]])
                .append_query_errors([sea_orm::DbErr::Custom("store outage".to_string())])
                .into_connection(),
        );
        let service = service_on(&db);

        let result = service
            .update_post_status("mod1", "post1", PostStatus::Deleted)
            .await
            .unwrap();

        assert_eq!(result.status, PostStatus::Deleted);
    }

    #[tokio::test]
    async fn test_generic_publish_does_not_notify() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("mod1", user::Role::Moderator)]])
                .append_query_results([[create_test_post("post1", PostStatus::Archived)]])
                .append_query_results([[create_test_post("post1", PostStatus::Published)]])
                .into_connection(),
        );
        let service = service_on(&db);

        service
            .update_post_status("mod1", "post1", PostStatus::Published)
            .await
            .unwrap();

        drop(service);
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        assert!(!format!("{log:?}").contains("notification"));
    }

    #[tokio::test]
    async fn test_restore_notifies() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("mod1", user::Role::Moderator)]])
                .append_query_results([[create_test_post("post1", PostStatus::Archived)]])
                .append_query_results([[create_test_post("post1", PostStatus::Published)]])
                .append_query_results([[campus_db::entities::notification::Model {
                    id: "n1".to_string(),
                    user_id: "author1".to_string(),
                    notification_type:
                        campus_db::entities::notification::NotificationType::PostRestored,
                    severity: campus_db::entities::notification::Severity::Success,
                    title: "Post restored".to_string(),
                    message: String::new(),
                    data: None,
                    is_read: false,
                    created_at: Utc::now().into(),
                }]])
                .into_connection(),
        );
        let service = service_on(&db);

        let restored = service.restore_post("mod1", "post1").await.unwrap();
        assert_eq!(restored.status, PostStatus::Published);

        drop(service);
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        assert!(format!("{log:?}").contains("notification"));
    }

    #[tokio::test]
    async fn test_update_comment_status_denies_plain_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u1", user::Role::User)]])
                .into_connection(),
        );
        let service = service_on(&db);

        let result = service
            .update_comment_status("u1", "c1", CommentStatus::Rejected)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_list_posts_returns_cursor() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("mod1", user::Role::Moderator)]])
                .append_query_results([[
                    create_test_post("post3", PostStatus::Published),
                    create_test_post("post2", PostStatus::Published),
                ]])
                .into_connection(),
        );
        let service = service_on(&db);

        let page = service
            .list_posts_for_moderation("mod1", &[PostStatus::Published], None, 2, None)
            .await
            .unwrap();

        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.last_id.as_deref(), Some("post2"));
    }
}
