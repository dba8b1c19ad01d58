//! Application factory
//!
//! Builds the actix-web application from already-wired services so the same
//! factory serves `main` and the integration tests.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use tracing_actix_web::TracingLogger;

use auth_core::repositories::{RefreshTokenRepository, UserRepository};
use auth_core::services::account::{AccountEventPublisher, PasswordHasher};
use auth_core::services::gate::Authenticator;

use crate::handlers::error::{json_error_handler, not_found};
use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{login, ping, refresh_token, signup, AppState};
use crate::routes::health::health_check;

/// Default JSON body limit in bytes
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 64 * 1024;

/// Create and configure the application with all dependencies
pub fn create_app<U, R, H, P>(
    app_state: web::Data<AppState<U, R, H, P>>,
    authenticator: web::Data<dyn Authenticator>,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
    P: AccountEventPublisher + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(authenticator)
        .app_data(json_config)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/auth/v1")
                .route("/signup", web::post().to(signup::<U, R, H, P>))
                .route("/login", web::post().to(login::<U, R, H, P>))
                .route("/refreshToken", web::post().to(refresh_token::<U, R, H, P>))
                .service(
                    web::resource("/ping")
                        .route(web::get().to(ping::<U, R, H, P>))
                        .wrap(JwtAuth::new()),
                ),
        )
        .default_service(web::route().to(not_found))
}
