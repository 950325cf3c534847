use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect},
};
use std::sync::Arc;
use tracing::{error, info};

use crate::api::AppState;

#[utoipa::path(
    get,
    path = "/api/logout",
    responses(
        (status = 303, description = "Session destroyed, cookie cleared, redirected to /")
    ),
    tag = "accounts"
)]
pub async fn logout(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    if let Some(id) = state.cookies().session_id(&headers) {
        if state.sessions().destroy(id).await {
            info!(session_id = %id, "session destroyed");
        }
    }

    // Always clear the cookie, even if the session was already gone.
    let mut response_headers = HeaderMap::new();
    match state.cookies().clear_cookie() {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build clear-cookie header: {err}"),
    }

    (response_headers, Redirect::to("/"))
}
