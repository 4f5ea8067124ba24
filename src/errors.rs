// ABOUTME: Centralized error handling and error types for the AgentCloak proxy
// ABOUTME: Defines error codes with HTTP-equivalent statuses and the stable JSON error form
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Unified Error Handling
//!
//! Standard error types and error codes used across the request envelope,
//! the tool layer, and the provider boundary. Every error that reaches an
//! agent is encoded as the stable JSON form produced by [`AppError::to_json`];
//! filter stages themselves are infallible and never construct these.

use crate::constants::{error_kinds, http_status};
use serde_json::{json, Value};
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Authentication is required but not provided
    AuthRequired,
    /// Authentication credentials are invalid, unknown, or revoked
    AuthInvalid,
    /// Authentication credential is malformed
    AuthMalformed,
    /// Rate limit has been exceeded
    RateLimitExceeded,
    /// Input validation failed
    InvalidInput,
    /// Required field is missing from request
    MissingRequiredField,
    /// Value is outside acceptable range
    ValueOutOfRange,
    /// Requested resource was not found
    ResourceNotFound,
    /// Message was withheld by the filter pipeline
    PolicyBlocked,
    /// External provider returned an error
    ExternalServiceError,
    /// External provider did not answer in time
    ExternalServiceTimeout,
    /// Internal server error
    InternalError,
    /// Serialization/deserialization failed
    SerializationError,
}

impl ErrorCode {
    /// Get the HTTP-equivalent status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::ValueOutOfRange => {
                http_status::BAD_REQUEST
            }
            Self::AuthRequired | Self::AuthInvalid | Self::AuthMalformed => {
                http_status::UNAUTHORIZED
            }
            Self::ResourceNotFound => http_status::NOT_FOUND,
            Self::RateLimitExceeded => http_status::TOO_MANY_REQUESTS,
            Self::ExternalServiceError => http_status::BAD_GATEWAY,
            Self::ExternalServiceTimeout => http_status::GATEWAY_TIMEOUT,
            Self::PolicyBlocked | Self::InternalError | Self::SerializationError => {
                http_status::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the stable machine-readable kind string for tool error payloads
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::AuthRequired | Self::AuthInvalid | Self::AuthMalformed => {
                error_kinds::UNAUTHENTICATED
            }
            Self::RateLimitExceeded => error_kinds::RATE_LIMITED,
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::ValueOutOfRange
            | Self::SerializationError
            | Self::InternalError => error_kinds::INVALID_REQUEST,
            Self::ResourceNotFound => error_kinds::NOT_FOUND,
            Self::PolicyBlocked => error_kinds::BLOCKED,
            Self::ExternalServiceError | Self::ExternalServiceTimeout => {
                error_kinds::PROVIDER_ERROR
            }
        }
    }
}

/// Application error carrying a code and a human-readable message
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// Error classification
    pub code: ErrorCode,
    /// Human-readable message; neutral for authentication failures
    pub message: String,
    /// Extra fields merged into the JSON error payload
    pub details: Option<Value>,
}

/// Convenient result alias for operations that can fail with [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an error with an explicit code
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Authentication required but no usable credential was presented
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Credential failed verification. The message is deliberately neutral
    /// so callers cannot distinguish unknown from revoked credentials.
    #[must_use]
    pub fn auth_invalid() -> Self {
        Self::new(ErrorCode::AuthInvalid, "Invalid credentials")
    }

    /// Credential did not match the expected token format
    #[must_use]
    pub fn auth_malformed() -> Self {
        Self::new(ErrorCode::AuthMalformed, "Invalid credentials")
    }

    /// Input validation failure
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// A required request field is absent
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// A numeric request field is out of its accepted range
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Referenced resource does not exist
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::new(ErrorCode::ResourceNotFound, format!("{resource} not found"))
    }

    /// Too many verification attempts from one source
    #[must_use]
    pub fn rate_limited(retry_after_secs: u64, limit: usize) -> Self {
        Self {
            code: ErrorCode::RateLimitExceeded,
            message: "Too many authentication attempts".to_owned(),
            details: Some(json!({
                "retryAfterSecs": retry_after_secs,
                "limit": limit,
            })),
        }
    }

    /// Internal failure surfaced with a stable shape
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach extra fields to the JSON error payload
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Encode this error as the stable tool error payload:
    /// `{"error": <kind>, "message": <text>, ...details}`
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut payload = json!({
            "error": self.code.kind(),
            "message": self.message,
        });
        if let (Some(obj), Some(Value::Object(extra))) =
            (payload.as_object_mut(), self.details.as_ref())
        {
            for (key, value) in extra {
                obj.insert(key.clone(), value.clone());
            }
        }
        payload
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_are_neutral() {
        assert_eq!(AppError::auth_invalid().message, "Invalid credentials");
        assert_eq!(AppError::auth_malformed().message, "Invalid credentials");
    }

    #[test]
    fn error_payload_includes_details() {
        let err = AppError::rate_limited(42, 10);
        let payload = err.to_json();
        assert_eq!(payload["error"], "rate_limited");
        assert_eq!(payload["retryAfterSecs"], 42);
        assert_eq!(payload["limit"], 10);
    }

    #[test]
    fn http_statuses_map_by_class() {
        assert_eq!(ErrorCode::AuthInvalid.http_status(), 401);
        assert_eq!(ErrorCode::RateLimitExceeded.http_status(), 429);
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::ExternalServiceError.http_status(), 502);
    }
}
