//! Application Configuration
//!
//! Configuration for the Auth application layer. Every secret and expiry
//! is supplied from outside; nothing here is hard-coded for production.

use std::time::Duration;

use platform::crypto::{random_bytes, to_hex};
use thiserror::Error;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret for email confirmation tokens
    pub confirm_email_secret: Vec<u8>,
    /// Email confirmation token TTL
    pub confirm_email_expires: Duration,
    /// Secret for access tokens
    pub access_secret: Vec<u8>,
    /// Access token TTL
    pub access_expires: Duration,
    /// Secret for refresh tokens
    pub refresh_secret: Vec<u8>,
    /// Refresh token TTL
    pub refresh_expires: Duration,
    /// Base URL of the frontend, used to build confirmation links
    pub frontend_url: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("confirm_email_secret", &"[REDACTED]")
            .field("confirm_email_expires", &self.confirm_email_expires)
            .field("access_secret", &"[REDACTED]")
            .field("access_expires", &self.access_expires)
            .field("refresh_secret", &"[REDACTED]")
            .field("refresh_expires", &self.refresh_expires)
            .field("frontend_url", &self.frontend_url)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AuthConfig {
    /// Create config with random secrets (for development)
    pub fn development() -> Self {
        Self {
            confirm_email_secret: random_secret(),
            confirm_email_expires: Duration::from_secs(24 * 3600),
            access_secret: random_secret(),
            access_expires: Duration::from_secs(15 * 60),
            refresh_secret: random_secret(),
            refresh_expires: Duration::from_secs(3650 * 24 * 3600),
            frontend_url: "http://localhost:3000".to_string(),
            password_pepper: None,
        }
    }

    /// Confirmation link sent by email
    pub fn confirm_email_url(&self, hash: &str) -> String {
        format!(
            "{}/confirm-email?hash={}",
            self.frontend_url.trim_end_matches('/'),
            hash
        )
    }
}

fn random_secret() -> Vec<u8> {
    to_hex(&random_bytes(32)).into_bytes()
}

/// Invalid expiry string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid duration: {0:?}")]
pub struct DurationParseError(pub String);

/// Parse an expiry such as `"15m"`, `"1d"`, `"3650d"`, `"30s"`, `"2h"`
///
/// A bare number is milliseconds. Units: `ms`, `s`, `m`, `h`, `d`, `w`, `y`.
pub fn parse_duration(raw: &str) -> Result<Duration, DurationParseError> {
    let s = raw.trim();
    let err = || DurationParseError(raw.to_string());

    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);

    let value: f64 = number.parse().map_err(|_| err())?;
    let millis_per_unit: f64 = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "ms" => 1.0,
        "s" | "sec" | "secs" => 1_000.0,
        "m" | "min" | "mins" => 60_000.0,
        "h" | "hr" | "hrs" => 3_600_000.0,
        "d" | "day" | "days" => 86_400_000.0,
        "w" | "week" | "weeks" => 604_800_000.0,
        "y" | "year" | "years" => 31_557_600_000.0,
        _ => return Err(err()),
    };

    let millis = value * millis_per_unit;
    if !millis.is_finite() || millis < 0.0 {
        return Err(err());
    }

    Ok(Duration::from_millis(millis.round() as u64))
}
