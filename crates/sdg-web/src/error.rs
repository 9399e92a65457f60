//! HTTP error responses.

use crate::pages;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use sdg_common::SdgError;
use serde::Serialize;
use tracing::{error, warn};

/// Errors a request handler can end with.
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    /// A required query or form field is absent or blank.
    #[error("Missing required parameter '{0}'")]
    MissingParameter(&'static str),

    /// Chart rendering or another library operation failed.
    #[error(transparent)]
    Dashboard(#[from] SdgError),

    /// A blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for request handlers.
pub type WebResult<T> = Result<T, WebError>;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

impl WebError {
    /// Status code the error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::Dashboard(SdgError::Validation { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Self::Dashboard(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Rejected request: {}", self);
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        self.log();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

/// A [`WebError`] rendered as an HTML page instead of JSON.
#[derive(Debug)]
pub struct HtmlError(pub WebError);

impl From<WebError> for HtmlError {
    fn from(err: WebError) -> Self {
        Self(err)
    }
}

impl From<SdgError> for HtmlError {
    fn from(err: SdgError) -> Self {
        Self(err.into())
    }
}

impl From<tokio::task::JoinError> for HtmlError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        self.0.log();
        let status = self.0.status();
        let page = pages::error_page(status, &self.0.to_string());
        (status, Html(page)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            WebError::MissingParameter("indicator").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::from(SdgError::validation_field("bad list", "entities")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::from(SdgError::graph("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message() {
        let err = WebError::MissingParameter("indicator");
        assert_eq!(err.to_string(), "Missing required parameter 'indicator'");
    }

    #[test]
    fn test_into_response_statuses() {
        let response = WebError::MissingParameter("indicator").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = HtmlError::from(SdgError::graph("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
