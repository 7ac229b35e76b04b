use personal_finance_advisor::analytics::MockAnalyticsEngine;
use personal_finance_advisor::api::start_server;
use personal_finance_advisor::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("Personal Finance Advisor - API Server");
    info!("Port: {}", api_port);

    let analytics = match std::env::var("ANALYSIS_DELAY_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
    {
        Some(ms) => MockAnalyticsEngine::with_delay(Duration::from_millis(ms)),
        None => MockAnalyticsEngine::new(),
    };

    let store = SessionStore::new();

    info!("Advisor engine initialized");

    start_server(store, Arc::new(analytics), api_port).await?;

    Ok(())
}
