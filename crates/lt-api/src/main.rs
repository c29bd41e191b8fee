//! logtail API — serves the tail of log files over HTTP.
//!
//! Usage: `lt-api [config.toml]`. Without a config file, settings come from
//! `LT_*` environment variables.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use lt_api::config::ApiConfig;
use lt_api::routes;
use lt_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "lt-api starting");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(path = %path, "loading config file");
            ApiConfig::from_file(&path)?
        }
        None => ApiConfig::from_env(),
    };
    config.tail_options().validate()?;
    tracing::info!(
        log_dir = %config.log_dir.display(),
        max_line_length = config.max_line_length,
        chunk_size = config.chunk_size,
        "config loaded"
    );

    let state = AppState::from_config(&config);
    let app = routes::build_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
