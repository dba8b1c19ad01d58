//! Service wiring and server startup.
//!
//! Storage and event backends are picked from configuration; each combination
//! is monomorphized into the same generic `serve`.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use auth_core::repositories::{
    InMemoryRefreshTokenRepository, InMemoryUserRepository, RefreshTokenRepository,
    UserRepository,
};
use auth_core::services::account::{
    AccountEventPublisher, AccountService, LoggingEventPublisher, PasswordHasher,
};
use auth_core::services::auth::AuthService;
use auth_core::services::gate::{AuthorizationGate, Authenticator};
use auth_core::services::refresh::{RefreshTokenConfig, RefreshTokenService};
use auth_core::services::token::{TokenCodec, TokenCodecConfig};
use auth_infra::{
    BcryptPasswordHasher, DatabasePool, MySqlRefreshTokenRepository, MySqlUserRepository,
    RedisEventPublisher,
};
use auth_shared::{AppConfig, AuthConfig, EventBackend, StorageBackend};

use crate::app::create_app;
use crate::routes::auth::AppState;

/// How often expired refresh tokens are swept from the store
const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Shared state handed to every worker
pub struct Services<U, R, H, P>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
    P: AccountEventPublisher + 'static,
{
    pub app_state: web::Data<AppState<U, R, H, P>>,
    pub authenticator: web::Data<dyn Authenticator>,
    pub refresh_service: Arc<RefreshTokenService<R, U>>,
}

/// Wire the services over the given collaborators
pub fn build_services<U, R, H, P>(
    auth: &AuthConfig,
    users: Arc<U>,
    refresh_tokens: Arc<R>,
    hasher: Arc<H>,
    publisher: Arc<P>,
) -> Services<U, R, H, P>
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
    P: AccountEventPublisher + 'static,
{
    let codec = Arc::new(TokenCodec::new(TokenCodecConfig::from(&auth.jwt)));

    let account_service = Arc::new(AccountService::new(users.clone(), hasher, publisher));
    let refresh_service = Arc::new(RefreshTokenService::new(
        refresh_tokens,
        users.clone(),
        codec.clone(),
        RefreshTokenConfig::from(&auth.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        account_service,
        refresh_service.clone(),
        codec.clone(),
    ));

    let gate: Arc<dyn Authenticator> = Arc::new(AuthorizationGate::new(codec, users));

    Services {
        app_state: web::Data::new(AppState::new(auth_service)),
        authenticator: web::Data::from(gate),
        refresh_service,
    }
}

/// Build the configured backends and serve until shutdown
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let hasher = Arc::new(BcryptPasswordHasher::from_config(&config.auth.password));

    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; accounts are lost on restart");
            let users = Arc::new(InMemoryUserRepository::new());
            let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::new());
            with_publisher(&config, users, refresh_tokens, hasher).await
        }
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("Failed to connect to MySQL")?;
            pool.run_migrations()
                .await
                .context("Failed to run database migrations")?;

            let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
            let refresh_tokens = Arc::new(MySqlRefreshTokenRepository::new(pool.get_pool().clone()));

            let result = with_publisher(&config, users, refresh_tokens, hasher).await;
            pool.close().await;
            result
        }
    }
}

async fn with_publisher<U, R, H>(
    config: &AppConfig,
    users: Arc<U>,
    refresh_tokens: Arc<R>,
    hasher: Arc<H>,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    match config.events.backend {
        EventBackend::Log => {
            let publisher = Arc::new(LoggingEventPublisher);
            let services = build_services(&config.auth, users, refresh_tokens, hasher, publisher);
            serve(config, services).await
        }
        EventBackend::Redis => {
            let publisher = RedisEventPublisher::from_config(&config.events)
                .await
                .context("Failed to connect event publisher to Redis")?;
            let services =
                build_services(&config.auth, users, refresh_tokens, hasher, Arc::new(publisher));
            serve(config, services).await
        }
    }
}

async fn serve<U, R, H, P>(config: &AppConfig, services: Services<U, R, H, P>) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
    P: AccountEventPublisher + 'static,
{
    let purge = spawn_purge_task(services.refresh_service.clone());

    let app_state = services.app_state;
    let authenticator = services.authenticator;
    let max_payload_size = config.server.max_payload_size;

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, environment = %config.environment, "Starting HTTP server");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), authenticator.clone(), max_payload_size)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await;

    purge.abort();
    tracing::info!("HTTP server stopped");
    result.context("HTTP server failed")
}

fn spawn_purge_task<R, U>(refresh_service: Arc<RefreshTokenService<R, U>>) -> tokio::task::JoinHandle<()>
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match refresh_service.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Purged expired refresh tokens"),
                Err(e) => tracing::warn!(error = %e, "Failed to purge expired refresh tokens"),
            }
        }
    })
}
