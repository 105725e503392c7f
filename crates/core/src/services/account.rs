//! Account resolution service.
//!
//! Bridges the external identity provider to local user records: a record
//! is created with the default role on first authentication, and session
//! tokens are minted here.

use campus_common::{AppError, AppResult, IdGenerator};
use campus_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for resolving an account from the identity provider.
#[derive(Debug, Deserialize, Validate)]
pub struct EnsureAccountInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(max = 256))]
    pub display_name: Option<String>,
}

/// Account service.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Authenticate a user by session token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Resolve an identity to a local account, creating it on first login.
    ///
    /// A fresh session token is minted either way.
    pub async fn ensure_account(&self, input: EnsureAccountInput) -> AppResult<user::Model> {
        input.validate()?;

        let token = self.id_gen.generate_token();

        if let Some(existing) = self.user_repo.find_by_email(&input.email).await? {
            let mut model: user::ActiveModel = existing.into();
            model.token = Set(Some(token));
            model.updated_at = Set(Some(chrono::Utc::now().into()));
            return self.user_repo.update(model).await;
        }

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(input.email),
            username: Set(input.username),
            display_name: Set(input.display_name),
            role: Set(user::Role::User),
            suspended_until: Set(None),
            suspension_reason: Set(None),
            token: Set(Some(token)),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.user_repo.create(model).await
    }
}
