use anyhow::Context;
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::{Html, IntoResponse},
};
use std::sync::Arc;
use tracing::debug;

use super::payload::Payload;
use crate::{
    accounts::{AccountError, LoginRequest},
    api::AppState,
};

#[utoipa::path(
    post,
    path = "/api/login",
    request_body(content = LoginRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Logged in; session cookie set and landing page returned", content_type = "text/html"),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid username or password"),
        (status = 500, description = "Server error")
    ),
    tag = "accounts"
)]
pub async fn login(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    Payload(request): Payload<LoginRequest>,
) -> Result<impl IntoResponse, AccountError> {
    let username = state.accounts().authenticate(request).await?;

    // A browser gets one session at a time.
    if let Some(previous) = state.cookies().session_id(&headers) {
        if state.sessions().destroy(previous).await {
            debug!(session_id = %previous, "replaced previous session");
        }
    }

    let session = state.sessions().create(&username).await;
    let cookie = state
        .cookies()
        .session_cookie(session.id())
        .context("failed to build session cookie")?;

    Ok((
        [(SET_COOKIE, cookie)],
        Html(state.landing_page().to_string()),
    ))
}
