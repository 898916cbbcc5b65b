//! Auth Service
//!
//! Bundles the collaborators once and builds use cases on demand. This is
//! the application state shared by the HTTP layer.

use std::sync::Arc;

use platform::password::{Argon2Hasher, CredentialHasher};
use platform::token::HmacTokenService;

use crate::application::authenticate::{AuthenticateUseCase, AuthenticatedUser};
use crate::application::config::AuthConfig;
use crate::application::confirm_email::ConfirmEmailUseCase;
use crate::application::login::{LoginInput, LoginOutput, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::refresh::RefreshUseCase;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::send_activation_email::SendActivationEmailUseCase;
use crate::domain::repository::{MailDispatcher, SessionRepository, UserRepository};
use crate::domain::value_object::{session_id::SessionId, user_id::UserId};
use crate::error::AuthResult;

/// Auth orchestrator over a user/session store `R` and mail dispatcher `M`
pub struct AuthService<R, M> {
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub tokens: Arc<HmacTokenService>,
    pub config: Arc<AuthConfig>,
}

impl<R, M> Clone for AuthService<R, M> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            hasher: self.hasher.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, M> AuthService<R, M>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MailDispatcher + Send + Sync + 'static,
{
    /// Argon2id hasher peppered from the config
    pub fn new(repo: R, mailer: M, config: AuthConfig) -> Self {
        let hasher = Arc::new(Argon2Hasher::new(config.password_pepper.clone()));
        Self::with_hasher(Arc::new(repo), Arc::new(mailer), hasher, config)
    }

    pub fn with_hasher(
        repo: Arc<R>,
        mailer: Arc<M>,
        hasher: Arc<dyn CredentialHasher>,
        config: AuthConfig,
    ) -> Self {
        Self {
            repo,
            mailer,
            hasher,
            tokens: Arc::new(HmacTokenService::new()),
            config: Arc::new(config),
        }
    }

    pub async fn register(&self, input: RegisterInput) -> AuthResult<UserId> {
        RegisterUseCase::new(
            self.repo.clone(),
            self.mailer.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
            self.config.clone(),
        )
        .execute(input)
        .await
    }

    pub async fn send_activation_email(&self, email: &str) -> AuthResult<()> {
        SendActivationEmailUseCase::new(
            self.repo.clone(),
            self.mailer.clone(),
            self.tokens.clone(),
            self.config.clone(),
        )
        .execute(email)
        .await
    }

    pub async fn confirm_email(&self, hash: &str) -> AuthResult<()> {
        ConfirmEmailUseCase::new(self.repo.clone(), self.tokens.clone(), self.config.clone())
            .execute(hash)
            .await
    }

    pub async fn login(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        LoginUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
            self.config.clone(),
        )
        .execute(input)
        .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<LoginOutput> {
        RefreshUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.tokens.clone(),
            self.config.clone(),
        )
        .execute(refresh_token)
        .await
    }

    pub async fn logout(&self, session_id: &SessionId) -> AuthResult<()> {
        LogoutUseCase::new(self.repo.clone()).execute(session_id).await
    }

    pub async fn logout_all(
        &self,
        user_id: &UserId,
        except: Option<&SessionId>,
    ) -> AuthResult<u64> {
        LogoutUseCase::new(self.repo.clone())
            .execute_all(user_id, except)
            .await
    }

    pub async fn authenticate(&self, access_token: &str) -> AuthResult<AuthenticatedUser> {
        AuthenticateUseCase::new(self.repo.clone(), self.tokens.clone(), self.config.clone())
            .execute(access_token)
            .await
    }
}
