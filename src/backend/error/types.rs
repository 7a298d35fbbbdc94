/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers. Each
 * variant maps to one HTTP status code so the routing layer renders
 * consistent responses, and storage faults never leak internal detail.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::AuthError;

/// API-wide error type
///
/// This enum represents every failure a handler can surface. Variants are
/// structured kinds rather than opaque strings so callers and tests can
/// match on them.
///
/// # Usage
///
/// ```rust
/// use allnik::backend::error::ApiError;
///
/// let err = ApiError::validation("email is required");
/// assert_eq!(err.status_code().as_u16(), 400);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input or missing required field
    #[error("{message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Authentication failure at the gate (missing/bad/expired token)
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Failed login attempt
    ///
    /// Unknown email and wrong password collapse into this one variant so
    /// the response does not reveal which of the two it was.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Valid identity, insufficient role or ownership
    #[error("{message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// No record matches the given identifier
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Duplicate unique field or invalid state transition
    #[error("{message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Unexpected failure from the storage collaborator
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Any other unexpected server fault
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `Auth` - 401 Unauthorized, or 403 for the forbidden kind
    /// - `InvalidCredentials` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - `Database` / `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Auth(err) => err.status_code(),
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message to expose to the client
    ///
    /// Storage faults are collapsed to a generic message; their detail is
    /// logged server-side only.
    pub fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("bad input").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("nope").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("taken").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_error_mapping() {
        assert_eq!(
            ApiError::Auth(AuthError::MissingToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Auth(AuthError::Expired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Auth(AuthError::Forbidden).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_database_error_hides_detail() {
        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "internal server error");
    }

    #[test]
    fn test_validation_message_passthrough() {
        let err = ApiError::validation("email is required");
        assert_eq!(err.message(), "email is required");
    }
}
