//! Confirm Email Use Case
//!
//! Moves an inactive user to active given a valid confirmation token.

use std::sync::Arc;

use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::domain::claims::ConfirmEmailClaims;
use crate::domain::entity::user::UserPatch;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_status::UserStatus;
use crate::error::{AuthError, AuthResult};

/// Confirm email use case
pub struct ConfirmEmailUseCase<U, T>
where
    U: UserRepository,
    T: TokenService,
{
    user_repo: Arc<U>,
    tokens: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> ConfirmEmailUseCase<U, T>
where
    U: UserRepository,
    T: TokenService,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, hash: &str) -> AuthResult<()> {
        let claims: ConfirmEmailClaims = self
            .tokens
            .verify(hash, &self.config.confirm_email_secret)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Email confirmation token rejected");
                AuthError::InvalidHash
            })?;

        let user_id = claims.confirm_email_user_id;

        // Unknown and already-active users are indistinguishable
        self.user_repo
            .find_by_id(&user_id)
            .await?
            .filter(|user| user.can_confirm_email())
            .ok_or(AuthError::UserNotFound)?;

        self.user_repo
            .update(&user_id, UserPatch::status(UserStatus::Active))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %user_id, "Email confirmed");

        Ok(())
    }
}
