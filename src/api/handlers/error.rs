use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::accounts::AccountError;

const SERVER_ERROR: &str = "Server error";

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Authentication => StatusCode::UNAUTHORIZED,
            Self::Duplicate => StatusCode::CONFLICT,
            Self::Infrastructure(err) => {
                // Full chain stays server-side.
                error!("request failed: {err:#}");
                return (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR).into_response();
            }
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::MISSING_REGISTRATION_FIELDS;
    use anyhow::anyhow;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn status_mapping() {
        let cases = [
            (
                AccountError::Validation(MISSING_REGISTRATION_FIELDS),
                StatusCode::BAD_REQUEST,
            ),
            (AccountError::Authentication, StatusCode::UNAUTHORIZED),
            (AccountError::Duplicate, StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            let message = err.to_string();
            let response = err.into_response();
            assert_eq!(response.status(), status);
            assert_eq!(body_text(response).await, message);
        }
    }

    #[tokio::test]
    async fn infrastructure_detail_is_hidden() {
        let response =
            AccountError::Infrastructure(anyhow!("password=hunter2 connection refused"))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Server error");
    }
}
