//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` returned by every route handler.
//! Each variant maps onto one HTTP status, and the response body is always a JSON
//! object of the form `{"error": "<message>"}` carrying the underlying message.
//!
//! `From` implementations for `StoreError`, `validator::ValidationErrors` and
//! `bcrypt::BcryptError` let handlers propagate failures with the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Represents all possible errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum AppError {
    /// A malformed or conflicting request (HTTP 400).
    /// Also carries the duplicate-username outcome of user creation.
    #[error("{0}")]
    BadRequest(String),
    /// An unexpected server-side error (HTTP 500).
    #[error("{0}")]
    InternalServerError(String),
    /// A failure reported by the backing store (HTTP 500).
    /// The raw store message is passed through to the client.
    #[error("{0}")]
    DatabaseError(String),
    /// Failed input validation (HTTP 422 Unprocessable Entity).
    #[error("Validation Error: {0}")]
    ValidationError(String),
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("request failed: {}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}

/// Converts `StoreError` into `AppError`.
///
/// A unique-username violation becomes the `400 Username exists` outcome;
/// everything else is a server fault.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            duplicate @ StoreError::DuplicateUsername => AppError::BadRequest(duplicate.to_string()),
            StoreError::Database(e) => AppError::DatabaseError(e.to_string()),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_responses() {
        let error = AppError::BadRequest("Invalid input".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::InternalServerError("Server error".into());
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::DatabaseError("connection reset".into());
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::ValidationError("username: too short".into());
        assert_eq!(error.error_response().status(), 422);
    }

    #[test]
    fn test_duplicate_username_maps_to_bad_request() {
        let error: AppError = StoreError::DuplicateUsername.into();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "Username exists");
    }

    #[test]
    fn test_unconfigured_store_maps_to_internal_error() {
        let error: AppError = StoreError::Unconfigured.into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_rt::test]
    async fn test_error_body_carries_raw_message() {
        let error = AppError::DatabaseError("pool timed out".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "pool timed out");
    }
}
