//! Domain Layer
//!
//! Contains entities, value objects, token claims, and repository traits.

pub mod claims;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use claims::{AccessClaims, ConfirmEmailClaims, RefreshClaims};
pub use entity::{session::Session, user::User, user::UserPatch};
pub use repository::{MailDispatcher, MailMessage, SessionRepository, UserRepository};
