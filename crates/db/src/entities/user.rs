//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Privilege tiers, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
pub enum Role {
    #[sea_orm(string_value = "user")]
    #[default]
    User,
    #[sea_orm(string_value = "moderator")]
    Moderator,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "superadmin")]
    Superadmin,
}

impl Role {
    /// Whether this role may perform moderation actions
    /// (content status changes, suspensions).
    #[must_use]
    pub fn can_moderate(self) -> bool {
        self >= Self::Moderator
    }

    /// Whether this role may perform user-management actions
    /// (promote/demote/list administrators).
    #[must_use]
    pub fn can_manage_users(self) -> bool {
        self >= Self::Admin
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Email from the identity provider (unique per account).
    #[sea_orm(unique)]
    pub email: String,

    #[sea_orm(unique)]
    pub username: String,

    /// Display name
    #[sea_orm(nullable)]
    pub display_name: Option<String>,

    /// Privilege tier
    pub role: Role,

    /// End of the current suspension window. Absent or past = not suspended.
    /// Stale values persist after expiry until the next suspend/unsuspend
    /// write; suspension checks derive from the timestamp, never from the
    /// row alone.
    #[sea_orm(nullable)]
    pub suspended_until: Option<DateTimeWithTimeZone>,

    /// Reason shown to the suspended user.
    #[sea_orm(nullable)]
    pub suspension_reason: Option<String>,

    /// Session token (minted when the identity provider resolves the account)
    #[sea_orm(unique, nullable)]
    pub token: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,

    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tiers() {
        assert!(!Role::User.can_moderate());
        assert!(Role::Moderator.can_moderate());
        assert!(Role::Admin.can_moderate());
        assert!(Role::Superadmin.can_moderate());

        assert!(!Role::User.can_manage_users());
        assert!(!Role::Moderator.can_manage_users());
        assert!(Role::Admin.can_manage_users());
        assert!(Role::Superadmin.can_manage_users());
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::User < Role::Moderator);
        assert!(Role::Moderator < Role::Admin);
        assert!(Role::Admin < Role::Superadmin);
    }
}
