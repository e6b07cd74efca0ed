use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Error returned by every handler, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Domain(abi::Error),
    MalformedRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::Domain(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            Self::Domain(abi::Error::Unauthorized) => StatusCode::UNAUTHORIZED,
            Self::Domain(abi::Error::Forbidden) => StatusCode::FORBIDDEN,
            Self::Domain(abi::Error::NotFound) => StatusCode::NOT_FOUND,
            Self::Domain(
                abi::Error::ConflictReservation(_)
                | abi::Error::AlreadyExists(_)
                | abi::Error::InvalidTransition { .. },
            ) => StatusCode::CONFLICT,
            Self::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<abi::Error> for ApiError {
    fn from(e: abi::Error) -> Self {
        Self::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::MalformedRequest(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::MalformedRequest(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        Self::MalformedRequest(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Domain(e) if status == StatusCode::INTERNAL_SERVER_ERROR => {
                error!(error = %e, "request failed");
                "Internal server error".to_string()
            }
            Self::Domain(e) => e.to_string(),
            Self::MalformedRequest(msg) => msg,
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
