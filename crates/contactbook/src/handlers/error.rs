use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use contactbook_core::contact::ValidationErrors;
use contactbook_core::pagination::PaginationError;
use contactbook_core::storage::{repository_error_to_status_code, RepositoryError};

/// Request failures detected before any domain logic runs.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The body could not be read as the expected JSON document.
    #[error("{message}")]
    MalformedBody { status: StatusCode, message: String },
    /// The query string could not be decoded.
    #[error("{0}")]
    MalformedQuery(String),
    /// A path segment that should be an integer is not one.
    #[error("Not found.")]
    NotFound,
}

impl From<JsonRejection> for RequestError {
    fn from(rejection: JsonRejection) -> Self {
        // Syntax and shape errors are both reported as 400.
        let status = match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
            other => other,
        };
        Self::MalformedBody {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for RequestError {
    fn from(rejection: QueryRejection) -> Self {
        Self::MalformedQuery(rejection.body_text())
    }
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(errors) = self.0.downcast_ref::<ValidationErrors>() {
            tracing::warn!(errors = ?errors, "Validation failed");
            return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
        }

        if let Some(request_error) = self.0.downcast_ref::<RequestError>() {
            tracing::warn!(error = %request_error, "Rejected request");
            return match request_error {
                RequestError::MalformedBody { status, message } => detail(*status, message),
                RequestError::MalformedQuery(message) => detail(StatusCode::BAD_REQUEST, message),
                RequestError::NotFound => detail(StatusCode::NOT_FOUND, "Not found."),
            };
        }

        if let Some(page_error) = self.0.downcast_ref::<PaginationError>() {
            return detail(StatusCode::NOT_FOUND, page_error.to_string());
        }

        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                tracing::error!(error = %repo_error, "Storage failure");
            }
            return detail(status, repo_error.to_string());
        }

        tracing::error!(error = %self.0, "Unhandled error");
        detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
