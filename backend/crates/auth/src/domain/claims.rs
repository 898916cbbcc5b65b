//! Token Claims
//!
//! Payloads carried by the three token purposes. Each purpose is signed
//! with its own secret.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{session_id::SessionId, user_id::UserId, user_role::UserRole};

/// Email confirmation token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmEmailClaims {
    pub confirm_email_user_id: UserId,
}

/// Access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub id: UserId,
    pub role: UserRole,
    pub session_id: SessionId,
}

/// Refresh token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshClaims {
    pub session_id: SessionId,
    /// The session's current shared secret
    pub hash: String,
}
