//! Register Use Case
//!
//! Creates an inactive email/password account and sends the activation
//! email. A failed send leaves the user persisted; the caller may resend.

use std::sync::Arc;

use nid::Nanoid;
use platform::password::{ClearTextPassword, CredentialHasher};
use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::application::send_activation_email::SendActivationEmailUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::{MailDispatcher, UserRepository};
use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    user_id::UserId,
    user_name::{USER_NAME_SUFFIX_LENGTH, UserName},
};
use crate::error::{AuthError, AuthResult};

/// Suffixed candidates tried after the bare handle is taken
const USER_NAME_ATTEMPTS: usize = 3;

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Register use case
pub struct RegisterUseCase<U, M, T>
where
    U: UserRepository,
    M: MailDispatcher,
    T: TokenService,
{
    user_repo: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
    activation: SendActivationEmailUseCase<U, M, T>,
}

impl<U, M, T> RegisterUseCase<U, M, T>
where
    U: UserRepository,
    M: MailDispatcher,
    T: TokenService,
{
    pub fn new(
        user_repo: Arc<U>,
        mailer: Arc<M>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<T>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            activation: SendActivationEmailUseCase::new(user_repo.clone(), mailer, tokens, config),
            user_repo,
            hasher,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<UserId> {
        let email = Email::new(&input.email)?;
        let full_name = FullName::new(&input.full_name)?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::invalid_field("password", e.to_string()))?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let user_name = self.available_user_name(&email).await?;
        let password_hash = self.hasher.hash(&password)?;

        let user = User::new(email, user_name, full_name, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        self.activation.execute(user.email.as_str()).await?;

        Ok(user.user_id)
    }

    /// Email local part, or the same with a random suffix when taken
    async fn available_user_name(&self, email: &Email) -> AuthResult<UserName> {
        let base = UserName::from_email(email);
        if self.user_repo.find_by_user_name(&base).await?.is_none() {
            return Ok(base);
        }

        for _ in 0..USER_NAME_ATTEMPTS {
            let id: Nanoid = Nanoid::new();
            let suffix: String = id.as_str().chars().take(USER_NAME_SUFFIX_LENGTH).collect();
            let candidate = base.with_suffix(&suffix);

            if self.user_repo.find_by_user_name(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        tracing::warn!(user_name = %base, "No free user name after suffix attempts");
        Err(AuthError::UserAlreadyExists)
    }
}
