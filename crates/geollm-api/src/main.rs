use std::sync::Arc;

use anyhow::Context;
use geollm_core::config::api_key_from_env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geollm_api::{cors_layer, create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geollm_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();
    let config = api_config.service_config().context("Failed to load configuration")?;

    let api_key = api_key_from_env()
        .context("Set GOOGLE_API_KEY to a Generative Language API key before starting the server")?;

    tracing::info!(
        port = api_config.port,
        geocoder = %config.geocoder_url.value,
        llm_model = %config.llm_model.value,
        region_margin = config.region_margin.value,
        "Starting GeoLLM API server"
    );

    let state = Arc::new(AppState::from_config(&config, api_key)?);

    let cors = cors_layer(&api_config.cors_origin)
        .with_context(|| format!("Invalid CORS origin: {}", api_config.cors_origin))?;

    let app = create_router(state).layer(cors);

    let addr = api_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", api_config.cors_origin);

    axum::serve(listener, app).await?;
    Ok(())
}
