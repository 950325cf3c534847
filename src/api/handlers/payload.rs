//! Request body extractor accepting JSON or HTML form posts.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Form, Json,
};
use serde::de::DeserializeOwned;

/// Deserializes the body as JSON or `application/x-www-form-urlencoded`,
/// picked by `Content-Type`. An empty body without a content type yields
/// `T::default()`, so missing fields are reported by validation instead.
pub struct Payload<T>(pub T);

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return BodyKind::Other;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(req.headers()) {
            BodyKind::Form => Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| Self(value))
                .map_err(|rejection| (StatusCode::BAD_REQUEST, rejection.body_text())),
            BodyKind::Json => Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| Self(value))
                .map_err(|rejection| (StatusCode::BAD_REQUEST, rejection.body_text())),
            BodyKind::Other => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| (StatusCode::BAD_REQUEST, rejection.body_text()))?;
                if bytes.is_empty() {
                    Ok(Self(T::default()))
                } else {
                    Err((
                        StatusCode::BAD_REQUEST,
                        "Unsupported request body".to_string(),
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::HeaderValue};
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        name: Option<String>,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Sample, (StatusCode, String)> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        Payload::<Sample>::from_request(request, &())
            .await
            .map(|Payload(value)| value)
    }

    #[test]
    fn content_type_detection() {
        let mut headers = HeaderMap::new();
        assert_eq!(body_kind(&headers), BodyKind::Other);

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert_eq!(body_kind(&headers), BodyKind::Json);

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        assert_eq!(body_kind(&headers), BodyKind::Form);
    }

    #[tokio::test]
    async fn json_and_form_bodies() {
        let json = extract(Some("application/json"), r#"{"name":"alice"}"#)
            .await
            .unwrap();
        assert_eq!(json.name.as_deref(), Some("alice"));

        let form = extract(Some("application/x-www-form-urlencoded"), "name=alice")
            .await
            .unwrap();
        assert_eq!(form.name.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn empty_body_without_content_type_is_default() {
        assert_eq!(extract(None, "").await.unwrap(), Sample::default());
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests() {
        let (status, _) = extract(Some("application/json"), "{not json").await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = extract(Some("text/plain"), "name=alice").await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
