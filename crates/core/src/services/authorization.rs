//! Authorization guard for moderation and user-management actions.

use campus_common::{AppError, AppResult};
use campus_db::{entities::user, repositories::UserRepository};

/// Authorization guard.
///
/// Read-only: resolves the caller's role from the store on every call.
/// Results must not be cached across operations, since role and suspension
/// state can change concurrently.
#[derive(Clone)]
pub struct AuthorizationService {
    user_repo: UserRepository,
}

impl AuthorizationService {
    /// Create a new authorization service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Resolve the caller, requiring moderation tier (moderator and above).
    pub async fn require_moderator(&self, caller_id: &str) -> AppResult<user::Model> {
        let caller = self.resolve(caller_id).await?;
        if !caller.role.can_moderate() {
            return Err(AppError::Forbidden(
                "Only moderators can perform this action".to_string(),
            ));
        }
        Ok(caller)
    }

    /// Resolve the caller, requiring user-management tier (admin and above).
    pub async fn require_admin(&self, caller_id: &str) -> AppResult<user::Model> {
        let caller = self.resolve(caller_id).await?;
        if !caller.role.can_manage_users() {
            return Err(AppError::Forbidden(
                "Only administrators can perform this action".to_string(),
            ));
        }
        Ok(caller)
    }

    /// Reject any mutation of a super administrator's role or suspension
    /// state. Applies regardless of caller tier; there is no self-service
    /// downgrade path.
    pub fn ensure_modifiable(target: &user::Model) -> AppResult<()> {
        if target.role == user::Role::Superadmin {
            return Err(AppError::Forbidden(
                "Cannot modify a super administrator".to_string(),
            ));
        }
        Ok(())
    }

    async fn resolve(&self, caller_id: &str) -> AppResult<user::Model> {
        if caller_id.is_empty() {
            return Err(AppError::Unauthorized);
        }
        self.user_repo.get_by_id(caller_id).await
    }
}
