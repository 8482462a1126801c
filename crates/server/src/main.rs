mod api;
mod pipeline;
mod router;
mod state;

use std::sync::Arc;

use tracing::info;

use filings_core::Config;
use filings_feed::NseFeedClient;
use filings_store::PgAnnouncementStore;

use crate::state::AppState;

fn load_config() -> Config {
    filings_core::config::load_dotenv();
    Config::from_env()
}

/// Construct the shared state: connect to PostgreSQL (running
/// migrations) and build the upstream session client.
async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = PgAnnouncementStore::connect(&config.postgres).await?;
    let feed = NseFeedClient::new(config.upstream.clone());

    Ok(Arc::new(AppState {
        store: Arc::new(store),
        feed: Arc::new(feed),
        classify: config.normalizer.classify,
    }))
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = build_state(config).await?;
    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// One pipeline cycle without the HTTP server — lets cron or a systemd
/// timer provide the ingestion cadence.
async fn ingest_once(config: &Config) -> anyhow::Result<()> {
    let state = build_state(config).await?;
    let inserted = pipeline::run_cycle(&state).await?;
    info!("Ingested {} announcements", inserted);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = load_config();
    config.log_summary();
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("serve") | None => serve(&config).await?,
        Some("ingest") => ingest_once(&config).await?,
        _ => {
            println!("filings v{}", env!("CARGO_PKG_VERSION"));
            println!("Usage: filings-server <command>");
            println!("  serve    Start the HTTP server (default)");
            println!("  ingest   Run one ingestion cycle and exit");
        }
    }

    Ok(())
}
