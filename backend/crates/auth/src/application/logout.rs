//! Logout Use Case
//!
//! Soft deletes sessions. Refresh and access tokens bound to a deleted
//! session stop verifying immediately.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{session_id::SessionId, user_id::UserId};
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Revoke one session
    pub async fn execute(&self, session_id: &SessionId) -> AuthResult<()> {
        if self.session_repo.soft_delete(session_id).await? {
            tracing::info!(session_id = %session_id, "Session revoked");
        } else {
            tracing::debug!(session_id = %session_id, "Session already revoked");
        }
        Ok(())
    }

    /// Revoke every session of a user, optionally keeping the current one
    pub async fn execute_all(
        &self,
        user_id: &UserId,
        except: Option<&SessionId>,
    ) -> AuthResult<u64> {
        let revoked = self
            .session_repo
            .soft_delete_all_for_user(user_id, except)
            .await?;

        tracing::info!(user_id = %user_id, sessions_revoked = revoked, "User sessions revoked");

        Ok(revoked)
    }
}
