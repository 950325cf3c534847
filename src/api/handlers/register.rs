use axum::extract::Extension;
use std::sync::Arc;

use super::payload::Payload;
use crate::{
    accounts::{AccountError, RegistrationRequest},
    api::AppState,
};

pub const CUSTOMER_ADDED: &str = "Customer added successfully";

#[utoipa::path(
    post,
    path = "/api/add_customer",
    request_body(content = RegistrationRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Customer added successfully", body = String),
        (status = 400, description = "All fields are required"),
        (status = 409, description = "User already exists"),
        (status = 500, description = "Server error")
    ),
    tag = "accounts"
)]
pub async fn add_customer(
    state: Extension<Arc<AppState>>,
    Payload(request): Payload<RegistrationRequest>,
) -> Result<&'static str, AccountError> {
    state.accounts().register(request).await?;

    Ok(CUSTOMER_ADDED)
}
