use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use timeweb_chatbot::{config::Settings, routes, state::AppState};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env().context("invalid configuration")?;

    let level = if settings.is_development() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.app_port));
    let state = AppState::from_settings(settings).context("failed to create agent client")?;
    let app = routes::build_app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "chatbot backend listening");
    axum::serve(listener, app).await?;
    Ok(())
}
