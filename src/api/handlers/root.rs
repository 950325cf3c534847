use axum::{extract::Extension, response::Html};
use std::sync::Arc;

use crate::api::AppState;

// axum handler for the landing page
pub async fn root(state: Extension<Arc<AppState>>) -> Html<String> {
    Html(state.landing_page().to_string())
}
