// ABOUTME: Structured error types for email provider operations
// ABOUTME: Distinguishes transport, auth, and remote-API failures with retry context
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider error types.
//!
//! Provider failures propagate to the presenter, which encodes them as the
//! tool's JSON error form; they are never masked as empty data.

use crate::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Errors surfaced by email provider backends
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network-level failure reaching the backend
    #[error("network error: {0}")]
    Network(String),

    /// The call did not complete within its timeout
    #[error("provider call timed out after {seconds}s")]
    Timeout {
        /// Timeout that elapsed
        seconds: u64,
    },

    /// The backend rejected the stored credentials
    #[error("provider authentication failed: {0}")]
    Auth(String),

    /// The backend returned a remote error status
    #[error("provider API error ({status}): {message}")]
    Api {
        /// Remote status code
        status: u16,
        /// Remote error message
        message: String,
    },

    /// The requested message, thread, or draft does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The backend returned data the client could not interpret
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        let code = match &err {
            ProviderError::Timeout { .. } => ErrorCode::ExternalServiceTimeout,
            ProviderError::NotFound(_) => ErrorCode::ResourceNotFound,
            ProviderError::Network(_)
            | ProviderError::Auth(_)
            | ProviderError::Api { .. }
            | ProviderError::InvalidResponse(_) => ErrorCode::ExternalServiceError,
        };
        Self::new(code, err.to_string())
    }
}
