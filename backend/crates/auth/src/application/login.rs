//! Login Use Case
//!
//! Verifies email/password credentials, opens a session and issues an
//! access/refresh token pair for it.

use std::sync::Arc;

use platform::password::{ClearTextPassword, CredentialHasher};
use platform::token::{SignedToken, TokenService};

use crate::application::config::AuthConfig;
use crate::domain::claims::{AccessClaims, RefreshClaims};
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, session_id::SessionId, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Tokens for a session plus the public profile fields
///
/// Also produced by a refresh. Never carries the password hash.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub access_token: SignedToken,
    pub refresh_token: SignedToken,
    pub user_id: UserId,
    pub session_id: SessionId,
    pub full_name: String,
    pub user_name: String,
    pub avatar: Option<String>,
}

/// Sign the access/refresh pair for a user's session
pub(crate) fn issue_session_tokens<T: TokenService>(
    tokens: &T,
    config: &AuthConfig,
    user: &User,
    session: &Session,
) -> AuthResult<LoginOutput> {
    let access_token = tokens.sign(
        &AccessClaims {
            id: user.user_id,
            role: user.user_role,
            session_id: session.session_id,
        },
        &config.access_secret,
        config.access_expires,
    )?;

    let refresh_token = tokens.sign(
        &RefreshClaims {
            session_id: session.session_id,
            hash: session.hash.clone(),
        },
        &config.refresh_secret,
        config.refresh_expires,
    )?;

    Ok(LoginOutput {
        access_token,
        refresh_token,
        user_id: user.user_id,
        session_id: session.session_id,
        full_name: user.full_name.to_string(),
        user_name: user.user_name.to_string(),
        avatar: user.avatar.clone(),
    })
}

/// Login use case
pub struct LoginUseCase<U, S, T>
where
    U: UserRepository,
    S: SessionRepository,
    T: TokenService,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, S, T> LoginUseCase<U, S, T>
where
    U: UserRepository,
    S: SessionRepository,
    T: TokenService,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<T>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            hasher,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(&input.email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.provider.uses_password() {
            return Err(AuthError::WrongProvider(user.provider));
        }

        let password = ClearTextPassword::for_verification(input.password);
        if !self.hasher.compare(&password, user.password_hash.as_ref())? {
            tracing::warn!(user_id = %user.user_id, "Password mismatch");
            return Err(AuthError::IncorrectPassword);
        }

        let session = Session::new(user.user_id);
        self.session_repo.create(&session).await?;

        let output = issue_session_tokens(&*self.tokens, &self.config, &user, &session)?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User logged in"
        );

        Ok(output)
    }
}
