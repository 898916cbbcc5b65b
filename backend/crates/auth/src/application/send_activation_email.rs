//! Send Activation Email Use Case
//!
//! Mints an email confirmation token for an inactive user and mails the
//! confirmation link.

use std::sync::Arc;

use platform::token::TokenService;
use serde_json::json;

use crate::application::config::AuthConfig;
use crate::domain::claims::ConfirmEmailClaims;
use crate::domain::repository::{MailDispatcher, MailMessage, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub const ACTIVATION_SUBJECT: &str = "Confirm your email";
pub const ACTIVATION_TEMPLATE: &str = "activation";

/// Send activation email use case
pub struct SendActivationEmailUseCase<U, M, T>
where
    U: UserRepository,
    M: MailDispatcher,
    T: TokenService,
{
    user_repo: Arc<U>,
    mailer: Arc<M>,
    tokens: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, M, T> SendActivationEmailUseCase<U, M, T>
where
    U: UserRepository,
    M: MailDispatcher,
    T: TokenService,
{
    pub fn new(user_repo: Arc<U>, mailer: Arc<M>, tokens: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            mailer,
            tokens,
            config,
        }
    }

    /// Fails with `UserNotFound` both for unknown addresses and for users
    /// that are no longer awaiting confirmation.
    pub async fn execute(&self, email: &str) -> AuthResult<()> {
        let email = Email::new(email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .filter(|user| user.can_confirm_email())
            .ok_or(AuthError::UserNotFound)?;

        let claims = ConfirmEmailClaims {
            confirm_email_user_id: user.user_id,
        };
        let signed = self.tokens.sign(
            &claims,
            &self.config.confirm_email_secret,
            self.config.confirm_email_expires,
        )?;

        let message = MailMessage {
            to: user.email.clone(),
            subject: ACTIVATION_SUBJECT.to_string(),
            template: ACTIVATION_TEMPLATE,
            context: json!({
                "fullName": user.full_name.as_str(),
                "url": self.config.confirm_email_url(&signed.token),
            }),
        };

        self.mailer.send(message).await?;

        tracing::info!(
            user_id = %user.user_id,
            expires_at = %signed.expires_at,
            "Activation email sent"
        );

        Ok(())
    }
}
