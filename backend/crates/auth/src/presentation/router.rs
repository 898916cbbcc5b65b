//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::service::AuthService;
use crate::domain::repository::{MailDispatcher, SessionRepository, UserRepository};
use crate::presentation::handlers;
use crate::presentation::middleware::require_access_token;

/// Create the Auth router for any store and mail dispatcher
///
/// Mount under `/api/v1/auth`.
pub fn auth_router<R, M>(service: AuthService<R, M>) -> Router
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MailDispatcher + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/logout", post(handlers::logout::<R, M>))
        .route("/me", get(handlers::me::<R, M>))
        .route_layer(middleware::from_fn_with_state(
            service.clone(),
            require_access_token::<R, M>,
        ));

    Router::new()
        .route("/email/register", post(handlers::register::<R, M>))
        .route("/email/confirm", post(handlers::confirm_email::<R, M>))
        .route("/email/send-activation", post(handlers::send_activation::<R, M>))
        .route("/email/login", post(handlers::login::<R, M>))
        .route("/refresh", post(handlers::refresh::<R, M>))
        .merge(protected)
        .with_state(service)
}
