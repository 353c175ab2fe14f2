use baseball_stats_api::config::{Config, ConfigError};
use baseball_stats_api::{app, db};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("unable to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("unable to create schema: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    tracing::info!("Starting baseball stats server...");

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let pool = db::connect(&config.database_url)
        .await
        .map_err(StartupError::Connection)?;

    tracing::info!("Database connection established.");

    if config.bootstrap_schema {
        db::ensure_schema(&pool).await.map_err(StartupError::Schema)?;
    }

    let app = app(pool.clone(), config.cors_origin.clone());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    tracing::info!("Server listening on {}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped.");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("Failed to listen for SIGTERM: {err}");
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

    tracing::info!("Shutdown signal received.");
}
