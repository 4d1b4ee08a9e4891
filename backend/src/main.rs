use anyhow::{Context, Result};
use content_flow_backend::{routes, AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Default to info-level logs; override via RUST_LOG if needed.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;

    tracing::info!("Starting content-flow backend");
    tracing::info!("Content API: {}", config.content.api_base);
    tracing::info!("Site URL: {}", config.site_url);

    // 缺少 API key 时在这里直接失败，不会发出任何请求
    let app_state = AppState::new(&config)?;
    let app = routes::create_router(app_state);

    let addr = config.listen_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
