use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::{RefreshTokenRepository, UserRepository};
use auth_core::services::account::{AccountEventPublisher, PasswordHasher};

use crate::dto::auth::{AuthResponseDto, LoginRequestDto};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /auth/v1/login
///
/// Exchanges a username and password for a token pair. Unknown usernames and
/// wrong passwords both answer 401 with the same body.
pub async fn login<U, R, H, P>(
    state: web::Data<AppState<U, R, H, P>>,
    request: web::Json<LoginRequestDto>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
    P: AccountEventPublisher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(error),
    }
}
