use auth_api::{bootstrap, telemetry};
use auth_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    telemetry::init_tracing(&config.logging)?;
    config.validate()?;
    tracing::info!(environment = %config.environment, "Starting auth service");

    bootstrap::run(config).await
}
