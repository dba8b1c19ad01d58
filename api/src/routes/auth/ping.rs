use actix_web::{web, HttpResponse};

use auth_core::repositories::{RefreshTokenRepository, UserRepository};
use auth_core::services::account::{AccountEventPublisher, PasswordHasher};

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthenticatedPrincipal;

use super::AppState;

/// Handler for GET /auth/v1/ping
///
/// Requires a Bearer access token. Answers with the caller's account id as a
/// plain-text body, or 401 when the token or the account is gone.
pub async fn ping<U, R, H, P>(
    state: web::Data<AppState<U, R, H, P>>,
    principal: AuthenticatedPrincipal,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
    P: AccountEventPublisher + 'static,
{
    match state.auth_service.whoami(&principal).await {
        Ok(user_id) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(user_id.to_string()),
        Err(error) => handle_domain_error(error),
    }
}
