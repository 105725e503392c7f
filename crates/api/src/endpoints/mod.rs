//! API endpoints.

mod admin;
mod auth;
mod moderation;
mod notifications;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/moderation", moderation::router())
        .nest("/admin", admin::router())
        .nest("/notifications", notifications::router())
}
