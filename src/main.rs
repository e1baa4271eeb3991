use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use helpdesk::{app, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up HELPDESK_TICKETS_FILE, HELPDESK_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("helpdesk=info,tower_http=info")),
        )
        .init();

    let config = config::config().clone();
    tracing::info!("Starting helpdesk in {:?} mode", config.environment);
    tracing::info!("Tickets stored in {}", config.storage.tickets_file.display());

    let bind_addr = format!("{}:{}", config.server.bind_host, config.server.port);
    let state = AppState::new(config);

    // Bootstrap the document up front so a bad path fails at startup, not on first request
    state
        .store
        .list()
        .await
        .context("failed to open ticket document")?;

    spawn_session_sweeper(state.clone());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Helpdesk listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}

fn spawn_session_sweeper(state: AppState) {
    let period = Duration::from_secs(state.config.session.idle_ttl_secs.clamp(60, 3600));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let removed = state.sessions.sweep().await;
            if removed > 0 {
                tracing::debug!("Swept {} expired session(s)", removed);
            }
        }
    });
}
