//! Auth Middleware
//!
//! Middleware for requiring a bearer access token on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::service::AuthService;
use crate::domain::repository::{MailDispatcher, SessionRepository, UserRepository};
use crate::presentation::handlers::bearer_token;

/// Authenticate the bearer access token and store the caller in request
/// extensions as `AuthenticatedUser`
pub async fn require_access_token<R, M>(
    State(service): State<AuthService<R, M>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MailDispatcher + Send + Sync + 'static,
{
    let token = bearer_token(req.headers()).map(str::to_owned);
    let authenticated = match token {
        Ok(token) => service.authenticate(&token).await,
        Err(e) => Err(e),
    };

    match authenticated {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
