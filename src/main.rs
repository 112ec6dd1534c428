//! Recipe catalogue server.
//!
//! Loads configuration from the environment (and `.env`), makes sure the recipe directory
//! exists, then serves the HTML pages and JSON endpoints until Ctrl-C or SIGTERM.

mod config;

use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use config::ServerConfig;
use recipes_core::{config::ensure_recipe_data_dir, CoreConfig, RecipeRepository};

/// Main entry point for the recipe server
///
/// # Environment Variables
/// - `PORT`: listen port, `8080` or `:8080` (default: 3000)
/// - `RECIPES_BIND_HOST`: listen host (default: "0.0.0.0")
/// - `PASSWORD_HASH`: hex SHA-256 of the shared password (required)
/// - `RECIPE_DATA_DIR`: recipe storage directory (default: "data")
/// - `WEB_ASSETS_DIR`: static assets directory (default: "web/assets")
///
/// # Errors
/// Returns an error if:
/// - the configuration is missing or invalid,
/// - the recipe directory cannot be created,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recipes_run=info".parse()?)
                .add_directive("recipes_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_cfg = ServerConfig::from_env()?;
    let core_cfg = Arc::new(CoreConfig::new(server_cfg.recipe_data_dir.clone())?);
    ensure_recipe_data_dir(&core_cfg)?;

    tracing::info!(
        "++ Starting recipes on {} (data: {}, assets: {})",
        server_cfg.bind_addr,
        core_cfg.recipe_data_dir().display(),
        server_cfg.assets_dir.display()
    );

    let app = api_rest::router(AppState {
        repository: RecipeRepository::new(core_cfg),
        gate: server_cfg.gate,
        assets_dir: server_cfg.assets_dir,
    });

    let listener = tokio::net::TcpListener::bind(&server_cfg.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
