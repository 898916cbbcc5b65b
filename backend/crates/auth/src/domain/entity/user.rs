//! User Entity
//!
//! Identity, credentials and lifecycle state of an account. Profile
//! counters are carried along but never interpreted by the auth core.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, full_name::FullName, user_id::UserId,
    user_name::UserName, user_role::UserRole, user_status::UserStatus,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, lowercased
    pub email: Email,
    /// Unique handle derived from the email
    pub user_name: UserName,
    pub full_name: FullName,
    /// Absent for externally authenticated accounts
    pub password_hash: Option<HashedPassword>,
    pub provider: AuthProvider,
    pub user_role: UserRole,
    pub user_status: UserStatus,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub post_count: i32,
    pub comment_count: i32,
    pub follower_count: i32,
    pub following_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user registered with email and password
    ///
    /// Starts as an inactive regular user until the email is confirmed.
    pub fn new(
        email: Email,
        user_name: UserName,
        full_name: FullName,
        password_hash: HashedPassword,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            user_name,
            full_name,
            password_hash: Some(password_hash),
            provider: AuthProvider::Email,
            user_role: UserRole::User,
            user_status: UserStatus::Inactive,
            bio: None,
            avatar: None,
            post_count: 0,
            comment_count: 0,
            follower_count: 0,
            following_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the confirm-email transition applies to this user
    pub fn can_confirm_email(&self) -> bool {
        self.user_status.awaits_confirmation()
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            full_name,
            password_hash,
            user_status,
            bio,
            avatar,
        } = patch;

        if let Some(full_name) = full_name {
            self.full_name = full_name;
        }
        if let Some(password_hash) = password_hash {
            self.password_hash = Some(password_hash);
        }
        if let Some(user_status) = user_status {
            self.user_status = user_status;
        }
        if let Some(bio) = bio {
            self.bio = Some(bio);
        }
        if let Some(avatar) = avatar {
            self.avatar = Some(avatar);
        }
        self.updated_at = Utc::now();
    }
}

/// Partial user update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub full_name: Option<FullName>,
    pub password_hash: Option<HashedPassword>,
    pub user_status: Option<UserStatus>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl UserPatch {
    pub fn status(user_status: UserStatus) -> Self {
        Self {
            user_status: Some(user_status),
            ..Default::default()
        }
    }
}
