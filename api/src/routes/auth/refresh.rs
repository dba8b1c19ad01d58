use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::{RefreshTokenRepository, UserRepository};
use auth_core::services::account::{AccountEventPublisher, PasswordHasher};

use crate::dto::auth::{AuthResponseDto, RefreshTokenRequestDto};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /auth/v1/refreshToken
///
/// Rotates a refresh token. The presented token is consumed whether or not
/// it turns out to be expired.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "opaque_refresh_token"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown, already used or expired refresh token
/// - 500 Internal Server Error: Store or token generation failure
pub async fn refresh_token<U, R, H, P>(
    state: web::Data<AppState<U, R, H, P>>,
    request: web::Json<RefreshTokenRequestDto>,
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

    match state.auth_service.refresh(&request.token).await {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(error),
    }
}
