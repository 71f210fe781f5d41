//! HTTP response types and error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::use_cases::CheckoutError;
use crate::domain::notifications::NotificationError;
use crate::domain::orders::OrderError;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" when the process is serving.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Uniform error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// API error carrying its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status to respond with.
    pub status: StatusCode,
    /// Message for the error body.
    pub message: String,
}

impl ApiError {
    /// Missing or malformed identity headers.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    /// Malformed request payload.
    #[must_use]
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<CheckoutError> for ApiError {
    fn from(error: CheckoutError) -> Self {
        let status = match &error {
            CheckoutError::Validation { .. } | CheckoutError::EmptyCart => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CheckoutError::Commit { .. } => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(error: OrderError) -> Self {
        let status = match &error {
            OrderError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            OrderError::InvalidStateTransition { .. } | OrderError::TerminalOrder { .. } => {
                StatusCode::CONFLICT
            }
            OrderError::NotFound { .. } => StatusCode::NOT_FOUND,
            OrderError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            OrderError::EmptyOrder | OrderError::InvalidParameters { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl From<NotificationError> for ApiError {
    fn from(error: NotificationError) -> Self {
        let status = match &error {
            NotificationError::NotFound(_) => StatusCode::NOT_FOUND,
            NotificationError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}
