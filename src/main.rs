use std::sync::Arc;
use std::time::Duration;
use tandem::config::Config;
use tandem::dashboard::DashboardService;
use tandem::services::MarketDataFetcher;
use tandem::sources::YahooFinanceClient;
use tandem::AppState;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tandem=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Tandem server on {}:{}", config.host, config.port);
    info!(
        "Tracking {} and {} with a {}s cache",
        config.index_symbol, config.commodity_symbol, config.cache_ttl_secs
    );

    let source = Arc::new(YahooFinanceClient::from_config(&config)?);
    let fetcher = Arc::new(MarketDataFetcher::new(source, config.cache_ttl()));
    let dashboard = Arc::new(DashboardService::new(config.clone(), fetcher.clone()));

    // Periodically drop expired cache entries
    {
        let fetcher = fetcher.clone();
        let period = config.cache_ttl().max(Duration::from_secs(1));
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                fetcher.cleanup();
                debug!("Cache cleanup: {} series retained", fetcher.cached_series());
            }
        });
    }

    let app = tandem::app(AppState::new(config.clone(), dashboard));

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Tandem server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
