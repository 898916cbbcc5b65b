//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use platform::token::SignedToken;
use serde::{Deserialize, Serialize};

use crate::application::login::LoginOutput;
use crate::domain::entity::user::User;

// ============================================================================
// Registration & Confirmation
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmEmailRequest {
    pub hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendActivationRequest {
    pub email: String,
}

// ============================================================================
// Login & Refresh
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A token and its absolute expiry (RFC 3339)
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires: DateTime<Utc>,
}

impl From<SignedToken> for TokenResponse {
    fn from(signed: SignedToken) -> Self {
        Self {
            token: signed.token,
            expires: signed.expires_at,
        }
    }
}

/// Login and refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: TokenResponse,
    pub refresh_token: TokenResponse,
    pub full_name: String,
    pub username: String,
    pub avatar: Option<String>,
}

impl From<LoginOutput> for LoginResponse {
    fn from(output: LoginOutput) -> Self {
        Self {
            access_token: output.access_token.into(),
            refresh_token: output.refresh_token.into(),
            full_name: output.full_name,
            username: output.user_name,
            avatar: output.avatar,
        }
    }
}

// ============================================================================
// Current User
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub status: String,
    pub provider: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id.to_string(),
            email: user.email.into_db(),
            username: user.user_name.into_db(),
            full_name: user.full_name.into_db(),
            role: user.user_role.code().to_string(),
            status: user.user_status.code().to_string(),
            provider: user.provider.code().to_string(),
            bio: user.bio,
            avatar: user.avatar,
        }
    }
}
