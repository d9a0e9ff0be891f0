use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use tts_relay::api::routes::{create_router, AppState};
use tts_relay::tts::{SpeechClient, SpeechService};
use tts_relay::Settings;

#[tokio::main]
async fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let addr = settings.addr()?;

    tracing::info!("TTS Relay v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Speech endpoint: {}", settings.api_url);
    tracing::info!("Max characters per request: {}", settings.max_chars);

    let client = SpeechClient::new(
        settings.api_url.clone(),
        settings.models.clone(),
        settings.request_timeout,
    )?;

    let state = Arc::new(AppState {
        speech: SpeechService::new(Arc::new(client), settings.max_chars),
        models: settings.models,
        prices: settings.prices,
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
