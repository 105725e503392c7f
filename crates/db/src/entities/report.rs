//! Content report entity.
//!
//! Reports feed the statistics shown to moderators; their own review
//! lifecycle is handled outside the moderation core.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of content a report points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ContentType {
    #[sea_orm(string_value = "post")]
    Post,
    #[sea_orm(string_value = "comment")]
    Comment,
}

/// Report status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
pub enum ReportStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "dismissed")]
    Dismissed,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user who submitted the report.
    pub reporter_id: String,

    /// The reported post or comment.
    #[sea_orm(indexed)]
    pub content_id: String,

    pub content_type: ContentType,

    #[sea_orm(column_type = "Text")]
    pub reason: String,

    pub status: ReportStatus,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub resolved_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReporterId",
        to = "super::user::Column::Id"
    )]
    Reporter,
}

impl ActiveModelBehavior for ActiveModel {}
