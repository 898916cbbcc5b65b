//! In-Memory Repository Implementation
//!
//! Lock-guarded maps with the same uniqueness rules as the SQL schema.
//! Used by tests and by the API binary when no database is configured.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::{
    session::Session,
    user::{User, UserPatch},
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, session_id::SessionId, user_id::UserId, user_name::UserName,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    sessions: HashMap<SessionId, Session>,
}

/// In-memory auth repository; clones share the same storage
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions ever created for a user, deleted ones included
    pub async fn session_count(&self, user_id: &UserId) -> usize {
        self.tables
            .read()
            .await
            .sessions
            .values()
            .filter(|s| s.user_id == *user_id)
            .count()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

impl std::fmt::Debug for InMemoryAuthRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAuthRepository").finish_non_exhaustive()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut tables = self.tables.write().await;

        // Check and insert under one write lock, like a unique index
        let taken = tables.users.values().any(|u| {
            u.user_id == user.user_id || u.email == user.email || u.user_name == user.user_name
        });
        if taken {
            return Err(AuthError::UserAlreadyExists);
        }

        tables.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.tables.read().await.users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.user_name == *user_name)
            .cloned())
    }

    async fn update(&self, user_id: &UserId, patch: UserPatch) -> AuthResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(user_id).map(|user| {
            user.apply(patch);
            user.clone()
        }))
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        let mut tables = self.tables.write().await;
        if tables.sessions.contains_key(&session.session_id) {
            return Err(AuthError::Internal("Duplicate session id".to_string()));
        }
        tables.sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_active_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        Ok(self
            .tables
            .read()
            .await
            .sessions
            .get(session_id)
            .filter(|s| !s.is_deleted())
            .cloned())
    }

    async fn find_by_id_with_deleted(
        &self,
        session_id: &SessionId,
    ) -> AuthResult<Option<Session>> {
        Ok(self.tables.read().await.sessions.get(session_id).cloned())
    }

    async fn update(&self, session: &Session, previous_hash: &str) -> AuthResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.sessions.get_mut(&session.session_id) {
            Some(stored) if !stored.is_deleted() && stored.hash_matches(previous_hash) => {
                stored.hash = session.hash.clone();
                stored.updated_at = session.updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn soft_delete(&self, session_id: &SessionId) -> AuthResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.sessions.get_mut(session_id) {
            Some(stored) if !stored.is_deleted() => {
                stored.soft_delete();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn soft_delete_all_for_user(
        &self,
        user_id: &UserId,
        except: Option<&SessionId>,
    ) -> AuthResult<u64> {
        let mut tables = self.tables.write().await;
        let mut revoked = 0;
        for session in tables.sessions.values_mut() {
            if session.user_id == *user_id
                && !session.is_deleted()
                && Some(&session.session_id) != except
            {
                session.soft_delete();
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}
