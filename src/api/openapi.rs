use utoipa::OpenApi;

use super::handlers::{health, login, logout, register, session};
use crate::accounts::{LoginRequest, RegistrationRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        login::login,
        register::add_customer,
        logout::logout,
        session::session,
        health::health,
    ),
    components(schemas(
        LoginRequest,
        RegistrationRequest,
        session::SessionResponse,
        health::Health
    )),
    tags(
        (name = "accounts", description = "Customer registration and session login"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
