use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use baralga_core::error::CoreError;
use baralga_db::error::RepoError;

use crate::response::{InternalDetail, Problem};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`RepoError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce problem-detail bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `baralga_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository error from `baralga_db`.
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// A request the extractors could not parse, with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A response value could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::from(errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(CoreError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, msg.clone())
            }
            AppError::Core(CoreError::Forbidden(msg)) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Repo(RepoError::ProjectNotFound) => {
                (StatusCode::NOT_FOUND, "Project not found".to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Repo(_) | AppError::Serialization(_) => {
                return internal_error_response(&self);
            }
        };

        Problem::for_status(status).with_detail(message).into_response()
    }
}

/// Log `err` and render the generic 500 body.
///
/// The underlying detail travels as an [`InternalDetail`] response extension;
/// [`crate::response::apply_problem_policy`] decides whether the client sees it.
fn internal_error_response(err: &AppError) -> Response {
    tracing::error!(error = %err, "internal server error");
    let mut response = Problem::internal().into_response();
    response
        .extensions_mut()
        .insert(InternalDetail(err.to_string()));
    response
}
