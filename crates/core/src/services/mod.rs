//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod admin;
pub mod authorization;
pub mod moderation;
pub mod notification;
pub mod suspension;

pub use account::{AccountService, EnsureAccountInput};
pub use admin::AdminService;
pub use authorization::AuthorizationService;
pub use moderation::{ModerationService, ModerationStats, PostModerationPage};
pub use notification::NotificationService;
pub use suspension::{SuspendUserInput, SuspensionService, SuspensionStatus};
