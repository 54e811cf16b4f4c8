//! Request extraction and error responses.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gra_core::error::GraError;
use serde_json::json;

/// `Json<T>` whose rejection is a 400 with `{"error": "Invalid JSON data"}`
/// instead of axum's plain-text body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!("rejected request body: {}", rejection.body_text());
                Err(ApiError::InvalidJson(rejection.body_text()))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid JSON data: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    Gra(#[from] GraError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::Gra(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Gra(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::InvalidJson(detail) => json!({"error": "Invalid JSON data", "detail": detail}),
            Self::Gra(e) => {
                if status.is_server_error() {
                    tracing::error!("request failed: {e}");
                }
                json!({"detail": e.to_string()})
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidJson("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(GraError::UnknownScenario("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(GraError::Provider("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_status() {
        let resp = ApiError::InvalidJson("EOF".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = ApiError::from(GraError::Config("bad".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
