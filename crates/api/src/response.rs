//! JSON and problem-detail response rendering.
//!
//! Success bodies are plain JSON. Every error body is a problem document
//! (`{"title", "status", "detail"?}`). Internal error detail reaches the
//! client only outside production mode; [`apply_problem_policy`] is the one
//! place that decides.

use std::any::Any;
use std::fmt;

use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Title used for every 500 response.
pub const INTERNAL_SERVER_ERROR_TITLE: &str = "internal server error";

/// A problem-detail error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    /// A problem titled after the status' canonical reason, e.g. `"not found"`.
    pub fn for_status(status: StatusCode) -> Self {
        Self {
            title: status
                .canonical_reason()
                .unwrap_or("error")
                .to_ascii_lowercase(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// The generic 500 problem with no detail.
    pub fn internal() -> Self {
        Self {
            title: INTERNAL_SERVER_ERROR_TITLE.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match serde_json::to_vec(&self) {
            Ok(bytes) => bytes,
            Err(_) => br#"{"title":"internal server error","status":500}"#.to_vec(),
        };
        (
            status,
            [(CONTENT_TYPE, HeaderValue::from_static(PROBLEM_CONTENT_TYPE))],
            body,
        )
            .into_response()
    }
}

/// Detail of an internal failure, attached to a 500 response as an extension
/// until [`apply_problem_policy`] either exposes or drops it.
#[derive(Debug, Clone)]
pub struct InternalDetail(pub String);

/// Renders a value as an `application/json` response.
///
/// If the value cannot be serialized the client gets a 500 problem body
/// instead of a truncated document.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T: Serialize> IntoResponse for JsonBody<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => (
                [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
                bytes,
            )
                .into_response(),
            Err(err) => AppError::Serialization(err).into_response(),
        }
    }
}

/// Log `err` and render a 500 problem, with detail only outside production.
pub fn render_problem(err: &dyn fmt::Display, production: bool) -> Response {
    tracing::error!(error = %err, "internal server error");
    internal_problem(err.to_string(), production).into_response()
}

fn internal_problem(detail: String, production: bool) -> Problem {
    if production {
        Problem::internal()
    } else {
        Problem::internal().with_detail(detail)
    }
}

/// Middleware applying the problem-detail policy to error responses.
///
/// Internal errors are rendered generic by default; outside production the
/// attached [`InternalDetail`] is folded back into the body. Error responses
/// produced by the middleware stack itself (timeouts, unsupported methods)
/// carry no body at all and get a problem document for their status.
pub async fn apply_problem_policy(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    if let Some(InternalDetail(detail)) = response.extensions_mut().remove::<InternalDetail>() {
        if state.config.production {
            return response;
        }
        return internal_problem(detail, false).into_response();
    }

    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();
    if !is_error || response.headers().contains_key(CONTENT_TYPE) {
        return response;
    }

    let mut problem = Problem::for_status(status).into_response();
    for (name, value) in response.headers() {
        if *name != CONTENT_LENGTH {
            problem.headers_mut().append(name.clone(), value.clone());
        }
    }
    problem
}

/// Fallback for requests that match no route.
pub async fn route_not_found(uri: Uri) -> Problem {
    Problem::for_status(StatusCode::NOT_FOUND).with_detail(format!("No route for {}", uri.path()))
}

/// Build the response for a panicking handler.
pub fn panic_response(
    production: bool,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |panic: Box<dyn Any + Send + 'static>| {
        render_problem(&panic_message(panic.as_ref()), production)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("handler panicked: {s}")
    } else {
        "handler panicked".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
