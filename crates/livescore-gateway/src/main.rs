use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod app;
mod http;

#[derive(Parser, Debug)]
#[command(name = "livescore-gateway")]
#[command(about = "Simulated live match scores streamed to viewers over server-sent events")]
#[command(version)]
struct Args {
    /// Path to livescore.toml
    #[arg(long, env = "LIVESCORE_CONFIG")]
    config: Option<String>,

    /// Listening port, overrides the config file
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "livescore_gateway=info,livescore_engine=info,tower_http=debug".into()
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = livescore_core::config::LivescoreConfig::load(args.config.as_deref())
        .unwrap_or_else(|e| {
            tracing::warn!("Config load failed ({}), using defaults", e);
            livescore_core::config::LivescoreConfig::default()
        });
    if let Some(port) = args.port {
        config.gateway.port = port;
    }

    let addr: SocketAddr = config.listen_addr().parse()?;
    info!(
        max_ticks = config.simulation.max_ticks,
        tick_interval_ms = config.simulation.tick_interval_ms,
        seeded = config.simulation.seed.is_some(),
        "simulation configured"
    );

    let state = Arc::new(app::AppState::new(config));
    let router = app::build_router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Matches events service listening at http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(Arc::clone(&state)))
        .await?;

    info!("livescore gateway stopped");
    Ok(())
}

/// Resolves on Ctrl-C. Event streams never end on their own, so the run is
/// stopped (viewers get the final frame) and every sink is released to let
/// the open responses complete.
async fn shutdown_signal(state: Arc<app::AppState>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    state.control.stop();
    let closed = state.registry.close_all();
    info!(closed, "shutting down");
}
