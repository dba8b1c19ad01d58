//! Shared fixtures for the API integration tests

use std::sync::Arc;

use auth_api::bootstrap::{build_services, Services};
use auth_core::repositories::{InMemoryRefreshTokenRepository, InMemoryUserRepository};
use auth_core::services::account::LoggingEventPublisher;
use auth_infra::BcryptPasswordHasher;
use auth_shared::AuthConfig;

pub type TestServices = Services<
    InMemoryUserRepository,
    InMemoryRefreshTokenRepository,
    BcryptPasswordHasher,
    LoggingEventPublisher,
>;

/// Services over empty in-memory stores with the cheapest bcrypt cost
pub fn test_services(auth: &AuthConfig) -> (TestServices, Arc<InMemoryUserRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let services = build_services(
        auth,
        users.clone(),
        Arc::new(InMemoryRefreshTokenRepository::new()),
        Arc::new(BcryptPasswordHasher::new(4)),
        Arc::new(LoggingEventPublisher),
    );
    (services, users)
}

/// Build an initialized test service from a `Services` value
#[macro_export]
macro_rules! init_app {
    ($services:expr) => {
        actix_web::test::init_service(auth_api::create_app(
            $services.app_state.clone(),
            $services.authenticator.clone(),
            auth_api::app::DEFAULT_MAX_PAYLOAD_SIZE,
        ))
        .await
    };
}
