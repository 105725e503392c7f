//! Session endpoints.
//!
//! The identity provider is external; its trusted callback exchanges the
//! verified identity for a local account and session token here.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::AppResult;
use campus_core::EnsureAccountInput;
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

/// Create session request (trusted identity-provider callback).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Session response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub token: String,
    pub role: String,
}

/// Resolve a verified identity to a local account and session token.
async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let user = state
        .account_service
        .ensure_account(EnsureAccountInput {
            email: req.email,
            username: req.username,
            display_name: req.display_name,
        })
        .await?;

    Ok(ApiResponse::ok(SessionResponse {
        token: user.token.unwrap_or_default(),
        role: super::admin::role_to_string(user.role),
        user_id: user.id,
    }))
}

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route("/session", post(create_session))
}
