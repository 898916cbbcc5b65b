//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Account-state failures are
//! deliberately coarse: a missing user and an ineligible user share
//! `UserNotFound`, and every token verification failure is one variant.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

use crate::domain::value_object::auth_provider::AuthProvider;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or username already taken
    #[error("User already exists")]
    UserAlreadyExists,

    /// User absent, or not eligible for the requested transition
    #[error("User not found")]
    UserNotFound,

    /// Email confirmation token failed verification
    #[error("Invalid hash")]
    InvalidHash,

    /// Access or refresh token failed verification, or its session is gone
    #[error("Invalid token")]
    InvalidToken,

    /// Account belongs to an external provider
    #[error("Please login with {0}")]
    WrongProvider(AuthProvider),

    /// Password mismatch
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Account has no stored password hash
    #[error("Password not set for user")]
    PasswordNotSet,

    /// Input validation failure scoped to a request field
    #[error("{field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    /// Mail dispatch failure
    #[error("Mail dispatch failed: {0}")]
    Mail(String),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    PasswordHash(PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        AuthError::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidHash | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::WrongProvider(_)
            | AuthError::IncorrectPassword
            | AuthError::PasswordNotSet
            | AuthError::InvalidField { .. } => ErrorKind::UnprocessableEntity,
            AuthError::Mail(_) => ErrorKind::ServiceUnavailable,
            AuthError::Token(_)
            | AuthError::PasswordHash(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the logs; the response only carries the
    /// kind's generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::UserAlreadyExists => {
                AppError::conflict(self.to_string()).with_field_error("email", self.to_string())
            }
            AuthError::WrongProvider(_) => AppError::field("email", self.to_string()),
            AuthError::IncorrectPassword | AuthError::PasswordNotSet => {
                AppError::field("password", self.to_string())
            }
            AuthError::InvalidField { field, message } => AppError::field(*field, message.clone()),
            AuthError::Mail(_) => AppError::service_unavailable("Mail service unavailable"),
            AuthError::Token(_)
            | AuthError::PasswordHash(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Mail(msg) => {
                tracing::error!(message = %msg, "Activation mail could not be sent");
            }
            AuthError::InvalidHash | AuthError::InvalidToken => {
                tracing::warn!(error = %self, "Rejected token");
            }
            AuthError::IncorrectPassword => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::MissingHash => AuthError::PasswordNotSet,
            other => AuthError::PasswordHash(other),
        }
    }
}
