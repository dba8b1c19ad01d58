use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::{RefreshTokenRepository, UserRepository};
use auth_core::services::account::{AccountEventPublisher, PasswordHasher};

use crate::dto::auth::{AuthResponseDto, SignupRequestDto};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /auth/v1/signup
///
/// Registers an account and returns its first token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "password": "secret123",
///     "first_name": "Alice"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "accessToken": "eyJ...",
///     "refreshToken": "opaque_refresh_token",
///     "userId": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Username already exists ("Already Exist") or invalid input
/// - 500 Internal Server Error: Store or hashing failure
pub async fn signup<U, R, H, P>(
    state: web::Data<AppState<U, R, H, P>>,
    request: web::Json<SignupRequestDto>,
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

    match state.auth_service.signup(request.into_inner().into()).await {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(error),
    }
}
