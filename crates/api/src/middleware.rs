//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use campus_core::{
    AccountService, AdminService, ModerationService, NotificationService, SuspensionService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub moderation_service: ModerationService,
    pub suspension_service: SuspensionService,
    pub admin_service: AdminService,
    pub notification_service: NotificationService,
}

/// Authentication middleware.
///
/// Resolves a bearer token to a user record and stashes it in request
/// extensions; guarded handlers reject requests where this did not happen.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.account_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
