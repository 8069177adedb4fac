//! Universal error handling for the browser

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that abort rendering a page
#[derive(Error, Debug)]
pub enum ViewError {
    /// An item of the object listing failed
    #[error("error listing objects: {0}")]
    ListObjects(#[source] StorageError),

    /// The bucket listing failed
    #[error("error listing buckets: {0}")]
    ListBuckets(#[source] StorageError),

    /// The template failed while rendering
    #[error("error executing template: {0}")]
    Template(#[from] askama::Error),
}

/// Application error type carrying the HTTP response to send
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// HTTP status the error is answered with
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    fn from_storage(err: &StorageError, message: String) -> Self {
        match err {
            StorageError::NoSuchBucket(_) | StorageError::NoSuchKey(_) => {
                Self::new(StatusCode::NOT_FOUND, "not_found", message)
            }
            StorageError::UpstreamError(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "upstream_error", message)
            }
            StorageError::S3Error(_) | StorageError::AwsError(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.code, self.message),
            500..=599 => tracing::error!("Server error: {} - {}", self.code, self.message),
            _ => {}
        }

        (self.status, self.message).into_response()
    }
}

/// Convert page errors to application errors
impl From<ViewError> for AppError {
    fn from(err: ViewError) -> Self {
        let message = err.to_string();
        match err {
            ViewError::ListObjects(ref source) | ViewError::ListBuckets(ref source) => {
                Self::from_storage(source, message)
            }
            ViewError::Template(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "template_error", message)
            }
        }
    }
}

/// Convert storage errors to application errors
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        let message = err.to_string();
        Self::from_storage(&err, message)
    }
}
