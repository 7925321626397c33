use tracing_subscriber::EnvFilter;

use dashboard_server::config::{ServerConfig, SourceConfig};
use dashboard_server::source::{
    CachedSnapshotSource, FileSnapshotSource, HttpSnapshotSource, SnapshotSource,
};
use dashboard_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    match &config.source {
        SourceConfig::File(path) => {
            tracing::info!(path = %path.display(), "serving snapshots from fixture");
            serve(FileSnapshotSource::new(path), &config).await
        }
        SourceConfig::Http(http) => {
            tracing::info!(url = %http.snapshot_url(), "serving snapshots from data server");
            serve(HttpSnapshotSource::new(http.clone())?, &config).await
        }
    }
}

async fn serve<S: SnapshotSource + 'static>(
    source: S,
    config: &ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let cached = CachedSnapshotSource::new(source, &config.cache);
    let app = create_router(AppState::new(cached));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, ttl_secs = config.cache.ttl.as_secs(), "dashboard server listening");
    tracing::info!("  GET  /health              - Health check");
    tracing::info!("  GET  /get_dashboard_data  - Raw snapshot");
    tracing::info!("  GET  /dashboard           - Display view model");

    axum::serve(listener, app).await?;
    Ok(())
}
