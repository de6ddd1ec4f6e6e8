//! JSON extractor that reports rejections in the API error format

use axum::{
    extract::{rejection::JsonRejection as AxumJsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Wrapper around `axum::Json` whose rejections are JSON error bodies
///
/// Unparseable bodies and bodies that do not match the expected shape are
/// both reported as 422.
#[derive(Debug, Clone, Copy)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &AxumJsonRejection) -> ApiError {
    use axum::extract::rejection::JsonRejection::*;

    let (status, message) = match rejection {
        JsonDataError(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Invalid JSON data: {}", err.body_text()),
        ),
        JsonSyntaxError(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Invalid JSON syntax: {}", err.body_text()),
        ),
        MissingJsonContentType(_) => (
            rejection.status(),
            "Missing Content-Type header. Expected 'application/json'.".to_string(),
        ),
        BytesRejection(err) => (
            rejection.status(),
            format!("Failed to read request body: {}", err.body_text()),
        ),
        _ => (rejection.status(), "Invalid JSON request".to_string()),
    };

    let mut error = ApiError::unprocessable(message).with_code("json_parse_error");
    error.status = status;
    error
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
