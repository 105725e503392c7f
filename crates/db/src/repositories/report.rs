//! Report repository.

use std::sync::Arc;

use crate::entities::{Report, report};
use campus_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

/// Report repository for database operations.
#[derive(Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Count pending reports (moderation dashboard statistic).
    pub async fn count_pending(&self) -> AppResult<u64> {
        Report::find()
            .filter(report::Column::Status.eq(report::ReportStatus::Pending))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    #[tokio::test]
    async fn test_count_pending() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[btreemap! {
                    "num_items" => Into::<Value>::into(3i64),
                }]])
                .into_connection(),
        );

        let repo = ReportRepository::new(db);
        let result = repo.count_pending().await.unwrap();

        assert_eq!(result, 3);
    }
}
