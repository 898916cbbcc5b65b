//! Repository Traits
//!
//! Interfaces for data persistence and outbound mail. Implementations are
//! in the infrastructure layer.

use serde_json::Value;

use crate::domain::entity::{
    session::Session,
    user::{User, UserPatch},
};
use crate::domain::value_object::{
    email::Email, session_id::SessionId, user_id::UserId, user_name::UserName,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    ///
    /// Fails with `AuthError::UserAlreadyExists` when the email or user
    /// name is taken, including when the store's unique index rejects a
    /// concurrent insert.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Apply a partial update, returning the updated user if it exists
    async fn update(&self, user_id: &UserId, patch: UserPatch) -> AuthResult<Option<User>>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Find a session that has not been soft deleted
    async fn find_active_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>>;

    /// Find a session regardless of soft deletion (audit)
    async fn find_by_id_with_deleted(&self, session_id: &SessionId)
    -> AuthResult<Option<Session>>;

    /// Persist a rotated hash only if the stored hash is still `previous_hash`.
    ///
    /// Returns false if the session is gone, deleted, or was rotated by
    /// someone else in the meantime.
    async fn update(&self, session: &Session, previous_hash: &str) -> AuthResult<bool>;

    /// Soft delete a session; returns false if it was already gone
    async fn soft_delete(&self, session_id: &SessionId) -> AuthResult<bool>;

    /// Soft delete every active session of a user, optionally keeping one
    async fn soft_delete_all_for_user(
        &self,
        user_id: &UserId,
        except: Option<&SessionId>,
    ) -> AuthResult<u64>;
}

/// Outbound mail
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub to: Email,
    pub subject: String,
    /// Template reference resolved by the transport
    pub template: &'static str,
    pub context: Value,
}

/// Mail dispatcher trait
///
/// Errors propagate to the caller; nothing here retries.
#[trait_variant::make(MailDispatcher: Send)]
pub trait LocalMailDispatcher {
    async fn send(&self, message: MailMessage) -> AuthResult<()>;
}
