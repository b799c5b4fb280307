use moodlist::app::AppContext;
use moodlist::config::{Config, LogFormat};
use moodlist::console;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,moodlist=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
    tracing::info!("Configuration loaded, backend at {}", config.api_base_url);

    // Initialize services
    let app = AppContext::from_config(&config).await?;
    if app.auth.is_logged_in().await {
        tracing::info!("Found a saved Spotify token");
    }

    let stdin = BufReader::new(tokio::io::stdin());
    console::run(&app, stdin, tokio::io::stdout()).await?;

    tracing::info!("Session {} finished", app.session_id);
    Ok(())
}
