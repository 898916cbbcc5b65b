//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, claims, repository traits
//! - `application/` - Use cases and the `AuthService` bundle
//! - `infra/` - PostgreSQL and in-memory stores, mail dispatcher
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Email/password registration with email confirmation
//! - Resending the activation email
//! - Login issuing an access token and a refresh token
//! - Refresh with session hash rotation, logout with soft-deleted sessions
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Tokens signed with HMAC-SHA256, one secret per purpose
//! - Unknown and ineligible accounts yield the same error

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::service::AuthService;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, PgAuthRepository, TracingMailDispatcher};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}
