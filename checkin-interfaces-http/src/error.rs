use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<checkin_application::AppError> for HttpError {
    fn from(value: checkin_application::AppError) -> Self {
        match value {
            checkin_application::AppError::Unauthorized => HttpError::Unauthorized,
            checkin_application::AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            checkin_application::AppError::NotFound(msg) => HttpError::NotFound(msg),
            checkin_application::AppError::Internal(err) => {
                error!("request failed: {:#}", err);
                HttpError::Internal("internal error".to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, format!("bad request: {}", msg)),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, format!("not found: {}", msg)),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
