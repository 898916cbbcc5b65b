//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    session::Session,
    user::{User, UserPatch},
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, full_name::FullName, session_id::SessionId,
    user_id::UserId, user_name::UserName, user_role::UserRole, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    id,
    email,
    username,
    full_name,
    password_hash,
    provider,
    role,
    status,
    bio,
    avatar,
    post_count,
    comment_count,
    follower_count,
    following_count,
    created_at,
    updated_at
"#;

const SESSION_COLUMNS: &str = "id, user_id, hash, created_at, updated_at, deleted_at";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_user_where(&self, column: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id,
                email,
                username,
                full_name,
                password_hash,
                provider,
                role,
                status,
                bio,
                avatar,
                post_count,
                comment_count,
                follower_count,
                following_count,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.user_name.as_str())
        .bind(user.full_name.as_str())
        .bind(user.password_hash.as_ref().map(|h| h.as_phc_string()))
        .bind(user.provider.id())
        .bind(user.user_role.id())
        .bind(user.user_status.id())
        .bind(user.bio.as_deref())
        .bind(user.avatar.as_deref())
        .bind(user.post_count)
        .bind(user.comment_count)
        .bind(user.follower_count)
        .bind(user.following_count)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(error = %e, "User insert hit unique index");
                Err(AuthError::UserAlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.find_user_where("email", email.as_str()).await
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        self.find_user_where("username", user_name.as_str()).await
    }

    async fn update(&self, user_id: &UserId, patch: UserPatch) -> AuthResult<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users SET
                full_name = COALESCE($2, full_name),
                password_hash = COALESCE($3, password_hash),
                status = COALESCE($4, status),
                bio = COALESCE($5, bio),
                avatar = COALESCE($6, avatar),
                updated_at = $7
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(patch.full_name.map(FullName::into_db))
            .bind(patch.password_hash.as_ref().map(|h| h.as_phc_string()))
            .bind(patch.user_status.map(|s| s.id()))
            .bind(patch.bio)
            .bind(patch.avatar)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, hash, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(&session.hash)
        .bind(session.created_at)
        .bind(session.updated_at)
        .bind(session.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_active_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        let sql =
            format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, SessionRow>(&sql)
            .bind(session_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn find_by_id_with_deleted(
        &self,
        session_id: &SessionId,
    ) -> AuthResult<Option<Session>> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1");
        let row = sqlx::query_as::<_, SessionRow>(&sql)
            .bind(session_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn update(&self, session: &Session, previous_hash: &str) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE sessions SET
                hash = $2,
                updated_at = $3
            WHERE id = $1 AND hash = $4 AND deleted_at IS NULL
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(&session.hash)
        .bind(session.updated_at)
        .bind(previous_hash)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn soft_delete(&self, session_id: &SessionId) -> AuthResult<bool> {
        let deleted = sqlx::query(
            r#"
            UPDATE sessions SET
                deleted_at = $2,
                updated_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(deleted == 1)
    }

    async fn soft_delete_all_for_user(
        &self,
        user_id: &UserId,
        except: Option<&SessionId>,
    ) -> AuthResult<u64> {
        let deleted = sqlx::query(
            r#"
            UPDATE sessions SET
                deleted_at = $3,
                updated_at = $3
            WHERE user_id = $1
              AND deleted_at IS NULL
              AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(except.map(|id| *id.as_uuid()))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    username: String,
    full_name: String,
    password_hash: Option<String>,
    provider: i16,
    role: i16,
    status: i16,
    bio: Option<String>,
    avatar: Option<String>,
    post_count: i32,
    comment_count: i32,
    follower_count: i32,
    following_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = self
            .password_hash
            .map(HashedPassword::from_phc_string)
            .transpose()
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;

        let provider = AuthProvider::from_id(self.provider)
            .ok_or_else(|| AuthError::Internal(format!("Invalid provider: {}", self.provider)))?;
        let user_role = UserRole::from_id(self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role: {}", self.role)))?;
        let user_status = UserStatus::from_id(self.status)
            .ok_or_else(|| AuthError::Internal(format!("Invalid status: {}", self.status)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            email: Email::from_db(self.email),
            user_name: UserName::from_db(self.username),
            full_name: FullName::from_db(self.full_name),
            password_hash,
            provider,
            user_role,
            user_status,
            bio: self.bio,
            avatar: self.avatar,
            post_count: self.post_count,
            comment_count: self.comment_count,
            follower_count: self.follower_count,
            following_count: self.following_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            hash: self.hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}
