//! Current-session lookup, so the frontend can show who is logged in without
//! a plaintext username cookie.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::AppState;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub user_name: String,
}

#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    ),
    tag = "accounts"
)]
pub async fn session(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    let Some(id) = state.cookies().session_id(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match state.sessions().get(id).await {
        Some(session) => Json(SessionResponse {
            user_name: session.username().to_string(),
        })
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
