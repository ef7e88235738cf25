use anyhow::Result;
use plantfacts_api::{build_app, ApiConfig};
use plantfacts_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("plantfacts_api");

    let config = ApiConfig::from_env();
    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(bind = %config.bind, "plant facts skill endpoint started");

    axum::serve(listener, app).await?;
    Ok(())
}
