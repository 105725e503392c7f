//! Post repository.

use std::sync::Arc;

use crate::entities::{Post, post};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(id.to_string()))
    }

    /// Update a post.
    pub async fn update(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get posts for the moderation queue (paginated, newest first).
    ///
    /// Ids are ULIDs, so a descending scan over ids is a descending scan
    /// over creation time; `until_id` is the forward-only cursor.
    pub async fn find_for_moderation(
        &self,
        statuses: &[post::PostStatus],
        author_id: Option<&str>,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<post::Model>> {
        let mut query = Post::find().order_by_desc(post::Column::Id).limit(limit);

        if !statuses.is_empty() {
            query = query.filter(post::Column::Status.is_in(statuses.iter().copied()));
        }

        if let Some(author) = author_id {
            query = query.filter(post::Column::UserId.eq(author));
        }

        if let Some(until) = until_id {
            query = query.filter(post::Column::Id.lt(until));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_post(id: &str, status: post::PostStatus) -> post::Model {
        post::Model {
            id: id.to_string(),
            user_id: "author1".to_string(),
            title: "Intro to lifetimes".to_string(),
            content: "Borrow checking, explained.".to_string(),
            status,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.get_by_id("ghost").await;

        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_for_moderation() {
        let post1 = create_test_post("post2", post::PostStatus::Published);
        let post2 = create_test_post("post1", post::PostStatus::Archived);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post1, post2]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo
            .find_for_moderation(
                &[post::PostStatus::Published, post::PostStatus::Archived],
                None,
                10,
                None,
            )
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }
}
