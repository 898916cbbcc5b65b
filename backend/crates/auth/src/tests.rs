//! Scenario tests for the auth core, driven through `AuthService` and the
//! HTTP router against the in-memory store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use platform::password::Argon2Hasher;
use platform::token::{HmacTokenService, TokenService};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::application::login::LoginInput;
use crate::application::refresh::RefreshUseCase;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::service::AuthService;
use crate::domain::claims::{AccessClaims, ConfirmEmailClaims, RefreshClaims};
use crate::domain::entity::session::Session;
use crate::domain::entity::user::{User, UserPatch};
use crate::domain::repository::{MailDispatcher, MailMessage, SessionRepository, UserRepository};
use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, full_name::FullName, session_id::SessionId,
    user_id::UserId, user_name::UserName, user_role::UserRole, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};
use crate::infra::memory::InMemoryAuthRepository;
use crate::presentation::router::auth_router;

// ============================================================================
// Fixtures
// ============================================================================

/// Records sent mail; can be switched into a failing mode
#[derive(Clone, Default)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<MailMessage>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The `hash` query parameter of the last confirmation link
    fn last_hash(&self) -> String {
        let sent = self.sent();
        let message = sent.last().expect("no mail sent");
        let url = message.context["url"].as_str().unwrap();
        url.split_once("hash=").unwrap().1.to_string()
    }
}

impl MailDispatcher for RecordingMailer {
    async fn send(&self, message: MailMessage) -> AuthResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AuthError::Mail("smtp unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

struct Harness {
    service: AuthService<InMemoryAuthRepository, RecordingMailer>,
    repo: InMemoryAuthRepository,
    mailer: RecordingMailer,
}

impl Harness {
    fn new() -> Self {
        let repo = InMemoryAuthRepository::new();
        let mailer = RecordingMailer::default();
        let hasher = Argon2Hasher::with_params(None, 1024, 1, 1).unwrap();
        let service = AuthService::with_hasher(
            Arc::new(repo.clone()),
            Arc::new(mailer.clone()),
            Arc::new(hasher),
            AuthConfig::development(),
        );
        Self {
            service,
            repo,
            mailer,
        }
    }

    fn config(&self) -> &AuthConfig {
        &self.service.config
    }

    async fn register(&self, email: &str) -> AuthResult<UserId> {
        self.service
            .register(RegisterInput {
                email: email.to_string(),
                password: "Secret1!".to_string(),
                full_name: "A A".to_string(),
            })
            .await
    }

    async fn login(&self, email: &str, password: &str) -> AuthResult<crate::application::LoginOutput> {
        self.service
            .login(LoginInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
    }

    /// Registered and confirmed
    async fn active_user(&self, email: &str) -> UserId {
        let user_id = self.register(email).await.unwrap();
        self.service.confirm_email(&self.mailer.last_hash()).await.unwrap();
        user_id
    }

    async fn user(&self, user_id: &UserId) -> User {
        UserRepository::find_by_id(&self.repo, user_id)
            .await
            .unwrap()
            .unwrap()
    }
}

/// A user that never set a password, e.g. created through an external provider
fn passwordless_user(email: &str, provider: AuthProvider) -> User {
    let email = Email::new(email).unwrap();
    let now = chrono::Utc::now();
    User {
        user_id: UserId::new(),
        user_name: UserName::from_email(&email),
        email,
        full_name: FullName::new("Gee User").unwrap(),
        password_hash: None,
        provider,
        user_role: UserRole::User,
        user_status: UserStatus::Active,
        bio: None,
        avatar: Some("avatars/gee.png".to_string()),
        post_count: 0,
        comment_count: 0,
        follower_count: 0,
        following_count: 0,
        created_at: now,
        updated_at: now,
    }
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_creates_inactive_email_user_and_sends_activation() {
    let h = Harness::new();
    let user_id = h.register("a@x.com").await.unwrap();

    let user = h.user(&user_id).await;
    assert_eq!(user.user_status, UserStatus::Inactive);
    assert_eq!(user.provider, AuthProvider::Email);
    assert_eq!(user.user_role, UserRole::User);
    assert_eq!(user.user_name.as_str(), "a");

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to.as_str(), "a@x.com");
    assert_eq!(sent[0].template, "activation");
    assert_eq!(sent[0].context["fullName"], "A A");
    let url = sent[0].context["url"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:3000/confirm-email?hash="));
}

#[tokio::test]
async fn test_register_twice_is_conflict() {
    let h = Harness::new();
    h.register("a@x.com").await.unwrap();

    let second = h.register("A@X.com").await;
    assert!(matches!(second, Err(AuthError::UserAlreadyExists)));
    assert_eq!(second.unwrap_err().status_code(), 409);
    assert_eq!(h.repo.user_count().await, 1);
}

#[tokio::test]
async fn test_register_validates_input() {
    let h = Harness::new();

    let result = h
        .service
        .register(RegisterInput {
            email: "not-an-email".to_string(),
            password: "Secret1!".to_string(),
            full_name: "A A".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::InvalidField { field: "email", .. })));

    let result = h
        .service
        .register(RegisterInput {
            email: "a@x.com".to_string(),
            password: "abc12".to_string(),
            full_name: "A A".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::InvalidField { field: "abc12", .. })));

    let result = h
        .service
        .register(RegisterInput {
            email: "a@x.com".to_string(),
            password: "Secret1!".to_string(),
            full_name: "  ".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::InvalidField { field: "fullName", .. })));

    assert_eq!(h.repo.user_count().await, 0);
    assert!(h.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_register_accepts_six_character_password() {
    let h = Harness::new();
    h.service
        .register(RegisterInput {
            email: "short@x.com".to_string(),
            password: "test123".to_string(),
            full_name: "Short Pass".to_string(),
        })
        .await
        .unwrap();

    assert!(h.login("short@x.com", "test123").await.is_ok());
}

#[tokio::test]
async fn test_user_name_collision_gets_suffix() {
    let h = Harness::new();
    let first = h.register("sam@x.com").await.unwrap();
    let second = h.register("sam@y.com").await.unwrap();

    let first = h.user(&first).await;
    let second = h.user(&second).await;
    assert_eq!(first.user_name.as_str(), "sam");
    assert_ne!(second.user_name, first.user_name);
    assert!(second.user_name.as_str().starts_with("sam"));
    assert!(second.user_name.as_str().len() <= "sam".len() + 5);
}

#[tokio::test]
async fn test_mail_failure_leaves_user_unconfirmed_and_resend_works() {
    let h = Harness::new();
    h.mailer.set_failing(true);

    let result = h.register("a@x.com").await;
    assert!(matches!(result, Err(AuthError::Mail(_))));
    assert_eq!(h.repo.user_count().await, 1);

    h.mailer.set_failing(false);
    h.service.send_activation_email("a@x.com").await.unwrap();
    h.service.confirm_email(&h.mailer.last_hash()).await.unwrap();

    let user = UserRepository::find_by_email(&h.repo, &Email::new("a@x.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.user_status, UserStatus::Active);
}

// ============================================================================
// Activation email & confirmation
// ============================================================================

#[tokio::test]
async fn test_send_activation_rejects_unknown_and_active_users_alike() {
    let h = Harness::new();
    h.active_user("a@x.com").await;

    let unknown = h.service.send_activation_email("nobody@x.com").await;
    let active = h.service.send_activation_email("a@x.com").await;

    assert!(matches!(unknown, Err(AuthError::UserNotFound)));
    assert!(matches!(active, Err(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_confirm_email_activates_once() {
    let h = Harness::new();
    let user_id = h.register("a@x.com").await.unwrap();
    let hash = h.mailer.last_hash();

    h.service.confirm_email(&hash).await.unwrap();
    assert_eq!(h.user(&user_id).await.user_status, UserStatus::Active);

    let again = h.service.confirm_email(&hash).await;
    assert!(matches!(again, Err(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_confirm_email_rejects_tampered_and_expired_tokens() {
    let h = Harness::new();
    let user_id = h.register("a@x.com").await.unwrap();
    let hash = h.mailer.last_hash();

    let mut tampered = hash.clone();
    tampered.insert(3, 'x');
    let result = h.service.confirm_email(&tampered).await;
    assert!(matches!(result, Err(AuthError::InvalidHash)));

    let expired = HmacTokenService::new()
        .sign(
            &ConfirmEmailClaims {
                confirm_email_user_id: user_id,
            },
            &h.config().confirm_email_secret,
            Duration::ZERO,
        )
        .unwrap();
    let result = h.service.confirm_email(&expired.token).await;
    assert!(matches!(result, Err(AuthError::InvalidHash)));

    let result = h.service.confirm_email("garbage").await;
    assert!(matches!(result, Err(AuthError::InvalidHash)));

    assert_eq!(h.user(&user_id).await.user_status, UserStatus::Inactive);
}

#[tokio::test]
async fn test_confirm_email_rejects_token_signed_for_other_purpose() {
    let h = Harness::new();
    let user_id = h.register("a@x.com").await.unwrap();

    let forged = HmacTokenService::new()
        .sign(
            &ConfirmEmailClaims {
                confirm_email_user_id: user_id,
            },
            &h.config().access_secret,
            Duration::from_secs(60),
        )
        .unwrap();

    let result = h.service.confirm_email(&forged.token).await;
    assert!(matches!(result, Err(AuthError::InvalidHash)));
}

#[tokio::test]
async fn test_confirm_email_for_unknown_user_is_not_found() {
    let h = Harness::new();
    let token = HmacTokenService::new()
        .sign(
            &ConfirmEmailClaims {
                confirm_email_user_id: UserId::new(),
            },
            &h.config().confirm_email_secret,
            Duration::from_secs(60),
        )
        .unwrap();

    let result = h.service.confirm_email(&token.token).await;
    assert!(matches!(result, Err(AuthError::UserNotFound)));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_register_confirm_login_scenario() {
    let h = Harness::new();
    let user_id = h.active_user("a@x.com").await;

    let output = h.login("a@x.com", "Secret1!").await.unwrap();
    assert!(!output.access_token.token.is_empty());
    assert!(!output.refresh_token.token.is_empty());
    assert!(output.refresh_token.expires_at > output.access_token.expires_at);
    assert_eq!(output.full_name, "A A");
    assert_eq!(output.user_name, "a");

    let tokens = HmacTokenService::new();
    let access: AccessClaims = tokens
        .verify(&output.access_token.token, &h.config().access_secret)
        .unwrap();
    assert_eq!(access.id, user_id);
    assert_eq!(access.role, UserRole::User);
    assert_eq!(access.session_id, output.session_id);

    let refresh: RefreshClaims = tokens
        .verify(&output.refresh_token.token, &h.config().refresh_secret)
        .unwrap();
    assert_eq!(refresh.session_id, output.session_id);

    let session = h
        .repo
        .find_active_by_id(&output.session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.hash, refresh.hash);
    assert_eq!(h.repo.session_count(&user_id).await, 1);
}

#[tokio::test]
async fn test_each_login_opens_a_session() {
    let h = Harness::new();
    let user_id = h.active_user("a@x.com").await;

    let first = h.login("a@x.com", "Secret1!").await.unwrap();
    let second = h.login("A@x.com", "Secret1!").await.unwrap();

    assert_ne!(first.session_id, second.session_id);
    assert_eq!(h.repo.session_count(&user_id).await, 2);
}

#[tokio::test]
async fn test_login_wrong_password_creates_no_session() {
    let h = Harness::new();
    let user_id = h.active_user("a@x.com").await;

    let err = h.login("a@x.com", "Secret2!").await.unwrap_err();
    assert!(matches!(err, AuthError::IncorrectPassword));
    assert_eq!(
        err.to_app_error().field_error("password"),
        Some("Incorrect password")
    );
    assert_eq!(h.repo.session_count(&user_id).await, 0);
}

#[tokio::test]
async fn test_login_unknown_email_is_not_found() {
    let h = Harness::new();
    let result = h.login("ghost@x.com", "Secret1!").await;
    assert!(matches!(result, Err(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_login_external_provider_names_provider() {
    let h = Harness::new();
    let user = passwordless_user("gee@x.com", AuthProvider::Google);
    UserRepository::create(&h.repo, &user).await.unwrap();

    let err = h.login("gee@x.com", "whatever!").await.unwrap_err();
    assert!(matches!(err, AuthError::WrongProvider(AuthProvider::Google)));
    assert_eq!(
        err.to_app_error().field_error("email"),
        Some("Please login with google")
    );
    assert_eq!(h.repo.session_count(&user.user_id).await, 0);
}

#[tokio::test]
async fn test_login_without_stored_hash_is_rejected() {
    let h = Harness::new();
    let user = passwordless_user("nohash@x.com", AuthProvider::Email);
    UserRepository::create(&h.repo, &user).await.unwrap();

    let result = h.login("nohash@x.com", "Secret1!").await;
    assert!(matches!(result, Err(AuthError::PasswordNotSet)));
    assert_eq!(h.repo.session_count(&user.user_id).await, 0);
}

#[tokio::test]
async fn test_login_does_not_require_confirmation() {
    let h = Harness::new();
    h.register("a@x.com").await.unwrap();

    let output = h.login("a@x.com", "Secret1!").await;
    assert!(output.is_ok());
}

// ============================================================================
// Refresh / Authenticate / Logout
// ============================================================================

#[tokio::test]
async fn test_refresh_rotates_session_hash() {
    let h = Harness::new();
    h.active_user("a@x.com").await;
    let login = h.login("a@x.com", "Secret1!").await.unwrap();

    let refreshed = h.service.refresh(&login.refresh_token.token).await.unwrap();
    assert_eq!(refreshed.session_id, login.session_id);
    assert_ne!(refreshed.refresh_token.token, login.refresh_token.token);

    // The presented refresh token is spent
    let replay = h.service.refresh(&login.refresh_token.token).await;
    assert!(matches!(replay, Err(AuthError::InvalidToken)));

    h.service.refresh(&refreshed.refresh_token.token).await.unwrap();
}

#[tokio::test]
async fn test_tokens_are_not_interchangeable() {
    let h = Harness::new();
    h.active_user("a@x.com").await;
    let login = h.login("a@x.com", "Secret1!").await.unwrap();

    let result = h.service.refresh(&login.access_token.token).await;
    assert!(matches!(result, Err(AuthError::InvalidToken)));

    let result = h.service.authenticate(&login.refresh_token.token).await;
    assert!(matches!(result, Err(AuthError::InvalidToken)));

    let me = h.service.authenticate(&login.access_token.token).await.unwrap();
    assert_eq!(me.user_id, login.user_id);
    assert_eq!(me.session_id, login.session_id);
}

#[tokio::test]
async fn test_logout_soft_deletes_session() {
    let h = Harness::new();
    h.active_user("a@x.com").await;
    let login = h.login("a@x.com", "Secret1!").await.unwrap();

    h.service.logout(&login.session_id).await.unwrap();
    // Idempotent
    h.service.logout(&login.session_id).await.unwrap();

    let access = h.service.authenticate(&login.access_token.token).await;
    assert!(matches!(access, Err(AuthError::InvalidToken)));
    let refresh = h.service.refresh(&login.refresh_token.token).await;
    assert!(matches!(refresh, Err(AuthError::InvalidToken)));

    let audit = h
        .repo
        .find_by_id_with_deleted(&login.session_id)
        .await
        .unwrap()
        .unwrap();
    assert!(audit.is_deleted());
}

#[tokio::test]
async fn test_logout_all_keeps_current_session() {
    let h = Harness::new();
    let user_id = h.active_user("a@x.com").await;
    let current = h.login("a@x.com", "Secret1!").await.unwrap();
    let other = h.login("a@x.com", "Secret1!").await.unwrap();

    let revoked = h
        .service
        .logout_all(&user_id, Some(&current.session_id))
        .await
        .unwrap();
    assert_eq!(revoked, 1);

    assert!(h.service.authenticate(&current.access_token.token).await.is_ok());
    assert!(h.service.authenticate(&other.access_token.token).await.is_err());
}

// ============================================================================
// Concurrency
// ============================================================================

/// Delegates to the in-memory store but yields after every read, so two
/// futures joined on one task interleave between check and write.
#[derive(Clone, Default)]
struct InterleavingRepo {
    inner: InMemoryAuthRepository,
}

impl UserRepository for InterleavingRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        UserRepository::create(&self.inner, user).await
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let found = self.inner.find_by_id(user_id).await;
        tokio::task::yield_now().await;
        found
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let found = self.inner.find_by_email(email).await;
        tokio::task::yield_now().await;
        found
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let found = self.inner.find_by_user_name(user_name).await;
        tokio::task::yield_now().await;
        found
    }

    async fn update(&self, user_id: &UserId, patch: UserPatch) -> AuthResult<Option<User>> {
        UserRepository::update(&self.inner, user_id, patch).await
    }
}

impl SessionRepository for InterleavingRepo {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        SessionRepository::create(&self.inner, session).await
    }

    async fn find_active_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        let found = self.inner.find_active_by_id(session_id).await;
        tokio::task::yield_now().await;
        found
    }

    async fn find_by_id_with_deleted(
        &self,
        session_id: &SessionId,
    ) -> AuthResult<Option<Session>> {
        self.inner.find_by_id_with_deleted(session_id).await
    }

    async fn update(&self, session: &Session, previous_hash: &str) -> AuthResult<bool> {
        SessionRepository::update(&self.inner, session, previous_hash).await
    }

    async fn soft_delete(&self, session_id: &SessionId) -> AuthResult<bool> {
        self.inner.soft_delete(session_id).await
    }

    async fn soft_delete_all_for_user(
        &self,
        user_id: &UserId,
        except: Option<&SessionId>,
    ) -> AuthResult<u64> {
        self.inner.soft_delete_all_for_user(user_id, except).await
    }
}

#[tokio::test]
async fn test_concurrent_registrations_create_one_user() {
    let h = Harness::new();
    let repo = Arc::new(InterleavingRepo::default());
    let register = RegisterUseCase::new(
        repo.clone(),
        Arc::new(h.mailer.clone()),
        h.service.hasher.clone(),
        h.service.tokens.clone(),
        h.service.config.clone(),
    );
    let input = || RegisterInput {
        email: "race@x.com".to_string(),
        password: "Secret1!".to_string(),
        full_name: "Race Condition".to_string(),
    };

    let (first, second) = tokio::join!(register.execute(input()), register.execute(input()));

    let outcomes = [&first, &second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(r, Err(AuthError::UserAlreadyExists)))
            .count(),
        1
    );
    assert_eq!(repo.inner.user_count().await, 1);
}

#[tokio::test]
async fn test_concurrent_refresh_with_same_token_succeeds_once() {
    let h = Harness::new();
    h.active_user("a@x.com").await;
    let login = h.login("a@x.com", "Secret1!").await.unwrap();

    let repo = Arc::new(InterleavingRepo {
        inner: h.repo.clone(),
    });
    let refresh = RefreshUseCase::new(
        repo.clone(),
        repo,
        h.service.tokens.clone(),
        h.service.config.clone(),
    );
    let token = login.refresh_token.token.as_str();

    let (first, second) = tokio::join!(refresh.execute(token), refresh.execute(token));

    let winner = match (first, second) {
        (Ok(winner), Err(AuthError::InvalidToken)) | (Err(AuthError::InvalidToken), Ok(winner)) => {
            winner
        }
        (first, second) => panic!("expected exactly one refresh to win: {first:?} / {second:?}"),
    };

    // The winner's token is the live one
    h.service.refresh(&winner.refresh_token.token).await.unwrap();
}

// ============================================================================
// HTTP
// ============================================================================

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_bearer(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_http_auth_flow() {
    let h = Harness::new();
    let router = auth_router(h.service.clone());

    let register = json!({"email": "a@x.com", "password": "Secret1!", "fullName": "A A"});
    let (status, _) = send(&router, post_json("/email/register", register.clone())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&router, post_json("/email/register", register)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (status, _) = send(
        &router,
        post_json("/email/confirm", json!({"hash": h.mailer.last_hash()})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &router,
        post_json("/email/login", json!({"email": "a@x.com", "password": "nope-nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["password"], "Incorrect password");

    let (status, body) = send(
        &router,
        post_json("/email/login", json!({"email": "a@x.com", "password": "Secret1!"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullName"], "A A");
    assert_eq!(body["username"], "a");
    assert!(body["avatar"].is_null());
    assert!(body["accessToken"]["expires"].is_string());
    let access = body["accessToken"]["token"].as_str().unwrap().to_string();
    let refresh = body["refreshToken"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(&router, with_bearer("GET", "/me", &access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["status"], "active");

    let (status, body) = send(&router, with_bearer("POST", "/refresh", &refresh)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["refreshToken"]["token"].is_string());

    let (status, _) = send(&router, with_bearer("POST", "/logout", &access)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, with_bearer("GET", "/me", &access)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_http_rejects_missing_bearer() {
    let h = Harness::new();
    let router = auth_router(h.service.clone());

    let request = Request::post("/logout").body(Body::empty()).unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::post("/refresh").body(Body::empty()).unwrap();
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid token");
}

#[tokio::test]
async fn test_http_send_activation_unknown_is_not_found() {
    let h = Harness::new();
    let router = auth_router(h.service.clone());

    let (status, body) = send(
        &router,
        post_json("/email/send-activation", json!({"email": "ghost@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}
