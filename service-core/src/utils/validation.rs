use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// Message returned when the body is missing, empty, or is not a JSON document.
pub const MISSING_BODY_MESSAGE: &str = "No se proporcionaron datos";

/// JSON body extractor that runs `validator` rules before the handler sees
/// the value. Both failure modes surface as 400 error envelopes.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|e| {
                tracing::debug!(rejection = %e, "Rejected request body");
                missing_body()
            })?;

        if is_empty_body(&body) {
            tracing::debug!("Rejected empty request body");
            return Err(missing_body());
        }

        let value: T = serde_json::from_value(body).map_err(|e| {
            tracing::debug!(error = %e, "Request body does not match the expected shape");
            missing_body()
        })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

fn missing_body() -> AppError {
    AppError::BadRequest(anyhow::anyhow!(MISSING_BODY_MESSAGE))
}

/// `null` and `{}` carry no data at all.
fn is_empty_body(body: &serde_json::Value) -> bool {
    match body {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse, routing::post, Router};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Echo {
        #[validate(length(min = 1, message = "Texto vacío"))]
        #[serde(default)]
        text: String,
    }

    async fn echo(ValidatedJson(body): ValidatedJson<Echo>) -> impl IntoResponse {
        body.text
    }

    async fn send(body: &'static str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/", post(echo));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (status, body) = send("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_BODY_MESSAGE);
    }

    #[tokio::test]
    async fn failed_rule_is_bad_request_with_message() {
        let (status, body) = send(r#"{"text": ""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Texto vacío");
    }

    #[tokio::test]
    async fn valid_body_reaches_handler() {
        let (status, _) = send(r#"{"text": "hola"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_object_is_missing_body() {
        let (status, body) = send("{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_BODY_MESSAGE);

        let (status, body) = send("null").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_BODY_MESSAGE);
    }

    #[tokio::test]
    async fn object_with_other_fields_reaches_validation() {
        let (status, body) = send(r#"{"other": 1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Texto vacío");
    }
}
