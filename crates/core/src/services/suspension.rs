//! Suspension service: time-bounded account suspension.

use campus_common::{AppError, AppResult};
use campus_db::{entities::user, repositories::UserRepository};
use chrono::{DateTime, Utc};
use sea_orm::Set;

use crate::services::{AuthorizationService, NotificationService};

/// Shortest suspension window. Requests below this are clamped up, not
/// rejected.
const MIN_SUSPENSION_HOURS: i64 = 1;

/// Input for suspending a user.
#[derive(Debug, Clone)]
pub struct SuspendUserInput {
    pub user_id: String,
    pub duration_hours: i64,
    pub reason: Option<String>,
}

/// Derived suspension state for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspensionStatus {
    pub is_suspended: bool,
    pub suspended_until: Option<DateTime<Utc>>,
    pub suspension_reason: Option<String>,
}

impl SuspensionStatus {
    /// Derive the suspension state from the stored window.
    ///
    /// Purely a comparison against `now`: an elapsed window reads as not
    /// suspended, and neither the stale timestamp nor the stale reason is
    /// surfaced. The stored fields are only rewritten by the next
    /// suspend/unsuspend.
    #[must_use]
    pub fn derive(user: &user::Model, now: DateTime<Utc>) -> Self {
        match user.suspended_until {
            Some(until) if until > now => Self {
                is_suspended: true,
                suspended_until: Some(until.with_timezone(&Utc)),
                suspension_reason: user.suspension_reason.clone(),
            },
            _ => Self {
                is_suspended: false,
                suspended_until: None,
                suspension_reason: None,
            },
        }
    }
}

/// Suspension service.
#[derive(Clone)]
pub struct SuspensionService {
    user_repo: UserRepository,
    authz: AuthorizationService,
    notifications: NotificationService,
}

impl SuspensionService {
    /// Create a new suspension service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        authz: AuthorizationService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            user_repo,
            authz,
            notifications,
        }
    }

    /// Suspend a user for a bounded window.
    ///
    /// `duration_hours` is floored to [`MIN_SUSPENSION_HOURS`]; zero and
    /// negative requests become one hour.
    pub async fn suspend_user(
        &self,
        moderator_id: &str,
        input: SuspendUserInput,
    ) -> AppResult<user::Model> {
        let moderator = self.authz.require_moderator(moderator_id).await?;

        if input.user_id.is_empty() {
            return Err(AppError::BadRequest("A target user id is required".to_string()));
        }

        // Can't suspend yourself
        if moderator.id == input.user_id {
            return Err(AppError::BadRequest("Cannot suspend yourself".to_string()));
        }

        let target = self.user_repo.get_by_id(&input.user_id).await?;
        AuthorizationService::ensure_modifiable(&target)?;

        let hours = input.duration_hours.max(MIN_SUSPENSION_HOURS);
        let until = Utc::now() + chrono::Duration::hours(hours);
        let reason = input.reason.unwrap_or_default();

        let mut model: user::ActiveModel = target.into();
        model.suspended_until = Set(Some(until.into()));
        model.suspension_reason = Set(Some(reason.clone()));
        model.updated_at = Set(Some(Utc::now().into()));

        let updated = self.user_repo.update(model).await?;

        if let Err(e) = self
            .notifications
            .notify_account_suspended(&updated.id, &moderator.id, hours, &reason, until)
            .await
        {
            tracing::warn!(error = %e, user_id = %updated.id, "Failed to dispatch suspension notification");
        }

        Ok(updated)
    }

    /// Lift a user's suspension.
    pub async fn unsuspend_user(
        &self,
        moderator_id: &str,
        user_id: &str,
    ) -> AppResult<user::Model> {
        let moderator = self.authz.require_moderator(moderator_id).await?;

        if user_id.is_empty() {
            return Err(AppError::BadRequest("A target user id is required".to_string()));
        }

        let target = self.user_repo.get_by_id(user_id).await?;
        AuthorizationService::ensure_modifiable(&target)?;

        let mut model: user::ActiveModel = target.into();
        model.suspended_until = Set(None);
        model.suspension_reason = Set(None);
        model.updated_at = Set(Some(Utc::now().into()));

        let updated = self.user_repo.update(model).await?;

        if let Err(e) = self
            .notifications
            .notify_suspension_lifted(&updated.id, &moderator.id)
            .await
        {
            tracing::warn!(error = %e, user_id = %updated.id, "Failed to dispatch unsuspension notification");
        }

        Ok(updated)
    }

    /// Alias of [`Self::unsuspend_user`], kept for call-site naming clarity.
    pub async fn remove_user_suspension(
        &self,
        moderator_id: &str,
        user_id: &str,
    ) -> AppResult<user::Model> {
        self.unsuspend_user(moderator_id, user_id).await
    }

    /// Derived suspension check. Never writes; see [`SuspensionStatus::derive`].
    pub async fn check_suspension(&self, user_id: &str) -> AppResult<SuspensionStatus> {
        if user_id.is_empty() {
            return Err(AppError::BadRequest("A user id is required".to_string()));
        }

        let user = self.user_repo.get_by_id(user_id).await?;
        Ok(SuspensionStatus::derive(&user, Utc::now()))
    }
}
