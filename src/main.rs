//! Civic report feed
//!
//! Loads the report feed the way the home screen does and prints the resulting state.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use civic_report_client::db::{self, SqliteStore};
use civic_report_client::{AuthContext, Config, FeedController, FeedSettings, HttpReportApi};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting civic report feed");
    tracing::info!("Backend: {}", config.api_base_url);
    tracing::info!("Database path: {:?}", config.db_path);

    // Local identity
    let pool = db::init_database(&config.db_path).await?;
    let store = SqliteStore::new(pool);
    let auth = AuthContext::from_store(&store).await;
    if !auth.is_signed_in() {
        tracing::warn!("No stored credentials; loading the feed anonymously");
    }

    let api = Arc::new(HttpReportApi::new(&config, auth.clone())?);
    let feed = FeedController::new(api, auth, FeedSettings::from(&config));

    feed.init().await;

    if let Some(text) = std::env::args().nth(1) {
        tracing::info!("Searching for {:?}", text);
        feed.set_text_query(text).await;
        feed.search_now().await;
    }

    let snapshot = feed.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(error) = &snapshot.error {
        tracing::error!("Feed failed to load: {}", error);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
