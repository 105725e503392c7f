//! Moderation notification entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Moderation event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum NotificationType {
    #[sea_orm(string_value = "postRemoved")]
    PostRemoved,
    #[sea_orm(string_value = "postArchived")]
    PostArchived,
    #[sea_orm(string_value = "postRestored")]
    PostRestored,
    #[sea_orm(string_value = "commentAccepted")]
    CommentAccepted,
    #[sea_orm(string_value = "commentRejected")]
    CommentRejected,
    #[sea_orm(string_value = "commentPending")]
    CommentPending,
    #[sea_orm(string_value = "accountSuspended")]
    AccountSuspended,
    #[sea_orm(string_value = "suspensionLifted")]
    SuspensionLifted,
}

/// Display severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Severity {
    #[sea_orm(string_value = "info")]
    Info,
    #[sea_orm(string_value = "success")]
    Success,
    #[sea_orm(string_value = "warning")]
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user receiving the notification
    #[sea_orm(indexed)]
    pub user_id: String,

    pub notification_type: NotificationType,

    pub severity: Severity,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Context bag (contentId, contentType, moderatorId, reason, ...)
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub data: Option<Json>,

    /// Has this notification been read?
    #[sea_orm(default_value = false)]
    pub is_read: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
