//! Environment Settings
//!
//! Reads the server and auth configuration from environment variables
//! (after `.env` has been loaded).

use std::env;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::config::{AuthConfig, parse_duration};

const DEFAULT_PORT: u16 = 31113;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Server settings
#[derive(Debug)]
pub struct Settings {
    pub port: u16,
    pub database_url: Option<String>,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("APP_PORT is not a port: {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let auth = if lookup("AUTH_JWT_SECRET").is_some() {
            auth_config_from(&lookup)?
        } else if cfg!(debug_assertions) {
            tracing::warn!("AUTH_JWT_SECRET not set, using random development secrets");
            let mut config = AuthConfig::development();
            if let Some(frontend_url) = lookup("FRONTEND_DOMAIN") {
                config.frontend_url = frontend_url;
            }
            config
        } else {
            bail!("AUTH_JWT_SECRET must be set in production");
        };

        Ok(Self {
            port,
            database_url,
            frontend_origins,
            auth,
        })
    }
}

fn auth_config_from(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<AuthConfig> {
    let secret = |key: &str| -> anyhow::Result<Vec<u8>> {
        let value = lookup(key).with_context(|| format!("{key} must be set"))?;
        if value.trim().is_empty() {
            bail!("{key} must not be empty");
        }
        Ok(value.into_bytes())
    };
    let expiry = |key: &str| -> anyhow::Result<Duration> {
        let raw = lookup(key).with_context(|| format!("{key} must be set"))?;
        parse_duration(&raw).with_context(|| format!("{key} is not a duration"))
    };

    Ok(AuthConfig {
        confirm_email_secret: secret("AUTH_CONFIRM_EMAIL_SECRET")?,
        confirm_email_expires: expiry("AUTH_CONFIRM_EMAIL_TOKEN_EXPIRES_IN")?,
        access_secret: secret("AUTH_JWT_SECRET")?,
        access_expires: expiry("AUTH_JWT_TOKEN_EXPIRES_IN")?,
        refresh_secret: secret("AUTH_REFRESH_SECRET")?,
        refresh_expires: expiry("AUTH_REFRESH_TOKEN_EXPIRES_IN")?,
        frontend_url: lookup("FRONTEND_DOMAIN").context("FRONTEND_DOMAIN must be set")?,
        password_pepper: lookup("AUTH_PASSWORD_PEPPER").map(String::into_bytes),
    })
}
