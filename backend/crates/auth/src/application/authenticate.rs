//! Authenticate Use Case
//!
//! Resolves a bearer access token to the caller, requiring the session
//! it names to still be active.

use std::sync::Arc;

use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::domain::claims::AccessClaims;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{session_id::SessionId, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Authenticated caller, stored in request extensions by the middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: UserRole,
    pub session_id: SessionId,
}

/// Authenticate use case
pub struct AuthenticateUseCase<S, T>
where
    S: SessionRepository,
    T: TokenService,
{
    session_repo: Arc<S>,
    tokens: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<S, T> AuthenticateUseCase<S, T>
where
    S: SessionRepository,
    T: TokenService,
{
    pub fn new(session_repo: Arc<S>, tokens: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, access_token: &str) -> AuthResult<AuthenticatedUser> {
        let claims: AccessClaims = self
            .tokens
            .verify(access_token, &self.config.access_secret)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Access token rejected");
                AuthError::InvalidToken
            })?;

        let session = self
            .session_repo
            .find_active_by_id(&claims.session_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if session.user_id != claims.id {
            tracing::warn!(session_id = %session.session_id, "Access token user does not own session");
            return Err(AuthError::InvalidToken);
        }

        Ok(AuthenticatedUser {
            user_id: claims.id,
            role: claims.role,
            session_id: claims.session_id,
        })
    }
}
