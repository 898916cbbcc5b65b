//! Session Entity
//!
//! One authenticated login. The `hash` is the secret shared with the
//! refresh token; it is rotated on every refresh. Sessions are soft
//! deleted so that revoked refresh tokens are rejected positively.

use chrono::{DateTime, Utc};
use platform::crypto::{constant_time_eq, random_sha256_hex};

use crate::domain::value_object::{session_id::SessionId, user_id::UserId};

#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    /// Hex SHA-256 of fresh random bytes
    pub hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            hash: random_sha256_hex(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Replace the shared secret, invalidating refresh tokens minted before
    pub fn rotate_hash(&mut self) {
        self.hash = random_sha256_hex();
        self.updated_at = Utc::now();
    }

    pub fn soft_delete(&mut self) {
        if self.deleted_at.is_none() {
            let now = Utc::now();
            self.deleted_at = Some(now);
            self.updated_at = now;
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Constant-time comparison against a presented secret
    pub fn hash_matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.hash.as_bytes(), candidate.as_bytes())
    }
}
