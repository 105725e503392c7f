//! Administrator management service.

use campus_common::{AppError, AppResult};
use campus_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;

use crate::services::AuthorizationService;

/// Ceiling for the administrator listing.
const MAX_ADMIN_LISTING: u64 = 100;

/// Administrator management service.
#[derive(Clone)]
pub struct AdminService {
    user_repo: UserRepository,
    authz: AuthorizationService,
}

impl AdminService {
    /// Create a new admin service.
    #[must_use]
    pub const fn new(user_repo: UserRepository, authz: AuthorizationService) -> Self {
        Self { user_repo, authz }
    }

    /// Look up a user by their identity-provider email.
    pub async fn search_user_by_email(
        &self,
        caller_id: &str,
        email: &str,
    ) -> AppResult<user::Model> {
        self.authz.require_admin(caller_id).await?;

        if email.is_empty() {
            return Err(AppError::BadRequest("An email is required".to_string()));
        }

        self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::UserNotFound(email.to_string()))
    }

    /// Grant the admin role.
    pub async fn promote_user_to_admin(
        &self,
        caller_id: &str,
        user_id: &str,
    ) -> AppResult<user::Model> {
        self.authz.require_admin(caller_id).await?;

        if user_id.is_empty() {
            return Err(AppError::BadRequest("A user id is required".to_string()));
        }

        let target = self.user_repo.get_by_id(user_id).await?;
        AuthorizationService::ensure_modifiable(&target)?;

        let mut model: user::ActiveModel = target.into();
        model.role = Set(user::Role::Admin);
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(model).await
    }

    /// Revoke the admin role. Only a super administrator may demote.
    pub async fn demote_user_from_admin(
        &self,
        caller_id: &str,
        user_id: &str,
    ) -> AppResult<user::Model> {
        let caller = self.authz.require_admin(caller_id).await?;

        if caller.role != user::Role::Superadmin {
            return Err(AppError::Forbidden(
                "Only a super administrator can demote an administrator".to_string(),
            ));
        }

        if user_id.is_empty() {
            return Err(AppError::BadRequest("A user id is required".to_string()));
        }

        let target = self.user_repo.get_by_id(user_id).await?;
        AuthorizationService::ensure_modifiable(&target)?;

        let mut model: user::ActiveModel = target.into();
        model.role = Set(user::Role::User);
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(model).await
    }

    /// List users holding an administrator role.
    pub async fn list_administrators(&self, caller_id: &str) -> AppResult<Vec<user::Model>> {
        self.authz.require_admin(caller_id).await?;

        self.user_repo.find_administrators(MAX_ADMIN_LISTING).await
    }
}
