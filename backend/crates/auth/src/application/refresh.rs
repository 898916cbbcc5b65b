//! Refresh Use Case
//!
//! Exchanges a refresh token for a new token pair on the same session,
//! rotating the session hash so the presented token cannot be reused.

use std::sync::Arc;

use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::application::login::{LoginOutput, issue_session_tokens};
use crate::domain::claims::RefreshClaims;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Refresh use case
pub struct RefreshUseCase<U, S, T>
where
    U: UserRepository,
    S: SessionRepository,
    T: TokenService,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    tokens: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, S, T> RefreshUseCase<U, S, T>
where
    U: UserRepository,
    S: SessionRepository,
    T: TokenService,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        tokens: Arc<T>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<LoginOutput> {
        let claims: RefreshClaims = self
            .tokens
            .verify(refresh_token, &self.config.refresh_secret)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Refresh token rejected");
                AuthError::InvalidToken
            })?;

        let mut session = self
            .session_repo
            .find_active_by_id(&claims.session_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !session.hash_matches(&claims.hash) {
            tracing::warn!(
                session_id = %session.session_id,
                "Refresh token hash does not match session"
            );
            return Err(AuthError::InvalidToken);
        }

        let user = self
            .user_repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        session.rotate_hash();
        if !self.session_repo.update(&session, &claims.hash).await? {
            tracing::warn!(
                session_id = %session.session_id,
                "Refresh token already used"
            );
            return Err(AuthError::InvalidToken);
        }

        let output = issue_session_tokens(&*self.tokens, &self.config, &user, &session)?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "Session refreshed"
        );

        Ok(output)
    }
}
