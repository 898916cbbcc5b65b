//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode, header};

use crate::application::authenticate::AuthenticatedUser;
use crate::application::login::LoginInput;
use crate::application::register::RegisterInput;
use crate::application::service::AuthService;
use crate::domain::repository::{MailDispatcher, SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ConfirmEmailRequest, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest,
    SendActivationRequest,
};

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidToken)
}

// ============================================================================
// Email Registration
// ============================================================================

/// POST /email/register
pub async fn register<R, M>(
    State(service): State<AuthService<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MailDispatcher + Send + Sync + 'static,
{
    service
        .register(RegisterInput {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /email/confirm
pub async fn confirm_email<R, M>(
    State(service): State<AuthService<R, M>>,
    Json(req): Json<ConfirmEmailRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MailDispatcher + Send + Sync + 'static,
{
    service.confirm_email(&req.hash).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /email/send-activation
pub async fn send_activation<R, M>(
    State(service): State<AuthService<R, M>>,
    Json(req): Json<SendActivationRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MailDispatcher + Send + Sync + 'static,
{
    service.send_activation_email(&req.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Login / Refresh / Logout
// ============================================================================

/// POST /email/login
pub async fn login<R, M>(
    State(service): State<AuthService<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MailDispatcher + Send + Sync + 'static,
{
    let output = service
        .login(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(output.into()))
}

/// POST /refresh
pub async fn refresh<R, M>(
    State(service): State<AuthService<R, M>>,
    headers: HeaderMap,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MailDispatcher + Send + Sync + 'static,
{
    let token = bearer_token(&headers)?;
    let output = service.refresh(token).await?;
    Ok(Json(output.into()))
}

/// POST /logout (requires access token)
pub async fn logout<R, M>(
    State(service): State<AuthService<R, M>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MailDispatcher + Send + Sync + 'static,
{
    service.logout(&user.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /me (requires access token)
pub async fn me<R, M>(
    State(service): State<AuthService<R, M>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MailDispatcher + Send + Sync + 'static,
{
    let profile = UserRepository::find_by_id(&*service.repo, &user.user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(profile.into()))
}
