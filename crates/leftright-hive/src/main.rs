use anyhow::Context;
use clap::Parser;
use leftright_hive::config::HiveConfig;
use leftright_hive::db;
use leftright_hive::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config = HiveConfig::parse();

    info!("🖐️  LeftRight Hive is initializing...");

    let pool = db::init_db(&config.db)
        .await
        .with_context(|| format!("could not open ratio store at {}", config.db))?;

    let state = Arc::new(AppState::new(pool.clone(), &config));
    let app = leftright_hive::app(state, config.body_limit);

    let addr = SocketAddr::new(config.host, config.port);
    info!("🚀 Hive listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("💤 Hive stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown requested");
}
