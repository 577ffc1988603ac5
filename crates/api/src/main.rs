use anyhow::Context;

use trattoria_api::{app::build_app, config::ApiConfig, context::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trattoria_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let state = AppState::from_config(&config)?;
    tracing::info!(?state, "access control ready");

    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
