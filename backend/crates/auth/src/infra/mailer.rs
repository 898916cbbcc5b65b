//! Mail Dispatcher Implementations
//!
//! SMTP delivery is handled outside this crate; the dispatcher here
//! records outbound mail in the log stream.

use crate::domain::repository::{MailDispatcher, MailMessage};
use crate::error::AuthResult;

/// Logs every message through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMailDispatcher;

impl TracingMailDispatcher {
    pub fn new() -> Self {
        Self
    }
}

/// Names of the template variables, never their values
fn context_keys(message: &MailMessage) -> String {
    message
        .context
        .as_object()
        .map(|fields| fields.keys().map(String::as_str).collect::<Vec<_>>().join(","))
        .unwrap_or_default()
}

impl MailDispatcher for TracingMailDispatcher {
    async fn send(&self, message: MailMessage) -> AuthResult<()> {
        // Values may carry a confirmation token
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            template = message.template,
            context = %context_keys(&message),
            "Mail dispatched"
        );
        Ok(())
    }
}
