use anyhow::Context;

use warehouse_api::app::{build_app, services::AppServices};
use warehouse_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    warehouse_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let services = AppServices::open(&config).context("failed to load catalog")?;
    let app = build_app(services, config.route_prefix.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
