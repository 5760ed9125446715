//! API error responses
//!
//! Maps domain errors to transport responses. Validation and duplicate
//! errors pass through verbatim as a list; storage failures surface only
//! their generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::account::{AuthError, RegisterError};
use crate::domain::session::AuthRequired;
use crate::domain::DomainError;

/// JSON body for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub errors: Vec<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, errors: Vec<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                success: false,
                errors,
            },
        }
    }

    /// Bad request carrying the full validation error list
    pub fn bad_request(errors: Vec<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, errors)
    }

    /// Authentication failure
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, vec![message.into()])
    }

    /// Authenticated but not allowed
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, vec![message.into()])
    }

    /// Internal failure with a generic, detail-free message
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, vec![message.into()])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Validation(errors) => {
                Self::bad_request(errors.iter().map(|e| e.to_string()).collect())
            }
            // The generic message only; internal detail stays in the logs
            storage @ RegisterError::Storage(_) => Self::internal(storage.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::unauthorized(err.to_string()),
            AuthError::AccountDisabled => Self::forbidden(err.to_string()),
            storage @ AuthError::Storage(_) => Self::internal(storage.to_string()),
        }
    }
}

impl From<AuthRequired> for ApiError {
    fn from(err: AuthRequired) -> Self {
        Self::unauthorized(err.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(_: DomainError) -> Self {
        Self::internal("Something went wrong. Please try again.")
    }
}
