//! # Taskhub Server
//!
//! Loads configuration, wires the components and serves the REST API until
//! a shutdown signal arrives.

use std::sync::Arc;
use taskhub_config::ConfigLoader;
use taskhub_core::telemetry::{init_tracing, shutdown_telemetry};
use taskhub_core::{TaskhubError, TaskhubResult};
use taskhub_repository::{create_pool, DatabasePoolInterface};
use taskhub_rest::{create_router, AppState};
use taskhub_server::di::{create_cache, AppModuleBuilder};
use taskhub_server::startup::{print_banner, print_startup_info};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Tracing may not be up yet when configuration fails.
        eprintln!("Application error: {}", e);
        error!("Application error: {}", e);
        shutdown_telemetry();
        std::process::exit(1);
    }
}

async fn run() -> TaskhubResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_tracing(&config.observability.telemetry(&config.app.name))?;
    print_banner();

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {}", config.app.environment);

    let db_pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }
    let db_pool: Arc<dyn DatabasePoolInterface> = db_pool;

    let cache = create_cache(&config.redis)?;

    let module = AppModuleBuilder::new()
        .with_database_pool(db_pool.clone())
        .with_cache(cache)
        .with_security_config(config.security.clone())
        .build()?;
    info!(
        "List cache {}",
        if module.cache().is_enabled() { "enabled" } else { "disabled" }
    );

    let app_state = AppState::new(
        module.auth_service(),
        module.user_service(),
        module.todo_service(),
        module.token_issuer(),
    );
    let router = create_router(app_state, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TaskhubError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TaskhubError::Internal(format!("REST server error: {}", e)))?;

    if tokio::time::timeout(config.server.shutdown_timeout(), db_pool.close())
        .await
        .is_err()
    {
        warn!(
            "Database pool did not close within {}s",
            config.server.shutdown_timeout_secs
        );
    }

    info!("Server shutdown complete");
    shutdown_telemetry();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
