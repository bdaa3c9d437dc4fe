use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use symptom_relay::application::services::AnalysisPipeline;
use symptom_relay::infrastructure::audio::WhisperEngine;
use symptom_relay::infrastructure::llm::GeminiClient;
use symptom_relay::infrastructure::observability::{TracingConfig, init_tracing};
use symptom_relay::infrastructure::storage::LocalUploadStore;
use symptom_relay::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let transcription = &settings.transcription;
    let transcription_engine = Arc::new(
        WhisperEngine::new(
            &transcription.base_url,
            &transcription.api_key,
            &transcription.model,
            &transcription.language,
            transcription.timeout(),
        )
        .context("Failed to build transcription client")?,
    );

    let interpretation = &settings.interpretation;
    let interpretation_client = Arc::new(
        GeminiClient::new(
            &interpretation.base_url,
            &interpretation.api_key,
            &interpretation.text_model,
            &interpretation.vision_model,
            interpretation.timeout(),
        )
        .context("Failed to build generative model client")?,
    );

    let upload_store = Arc::new(
        LocalUploadStore::new(settings.uploads.dir.clone())
            .context("Failed to prepare upload directory")?,
    );

    tracing::info!(
        upload_dir = %settings.uploads.dir.display(),
        max_file_size_mb = settings.uploads.max_file_size_mb,
        transcription_model = %transcription.model,
        language = %transcription.language,
        text_model = %interpretation.text_model,
        vision_model = %interpretation.vision_model,
        "Clients configured"
    );

    let state = AppState {
        pipeline: Arc::new(AnalysisPipeline::new(
            transcription_engine,
            interpretation_client,
        )),
        upload_store,
        max_upload_bytes: settings.uploads.max_body_bytes(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
