use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod backend;
mod config;
mod error;
mod routes;
mod shape;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();
    tracing::info!(
        bind = %config.bind_addr,
        engine = %config.engine_url,
        "rostrod starting"
    );

    let engine: routes::Engine = Arc::new(backend::AnalysisService::new(&config.engine_url));
    let app = routes::router(engine);

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("rostrod shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    }
}
