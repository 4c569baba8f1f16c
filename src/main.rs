//! MeepleLog
//!
//! Bootstraps the store: loads configuration, applies migrations and
//! reports whether the services are ready to be embedded.

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use MeepleLog::{
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService, PoolConfig},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", MeepleLog::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&PoolConfig::from(&settings.database))
        .await
        .context("Failed to connect to database")?;

    // Run database migrations
    run_migrations(&pool).await?;

    let store = Arc::new(DatabaseService::new(pool));
    let services = ServiceFactory::new(store, &settings);

    let status = services.health_check().await;
    if !status.is_healthy() {
        for issue in status.get_issues() {
            error!(issue = %issue, "Service health check failed");
        }
        anyhow::bail!("Services are not healthy");
    }

    info!(
        ttl_seconds = settings.invites.ttl_seconds,
        allow_code_only_join = settings.invites.allow_code_only_join,
        regenerate_requires_admin = settings.invites.regenerate_requires_admin,
        "MeepleLog store is ready"
    );
    Ok(())
}
