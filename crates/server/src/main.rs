//! Salon voice agent entry point

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fleur_agent::{SessionRegistry, TurnEngine};
use fleur_config::{load_settings, ServiceCatalog};
use fleur_core::{SpeechToText, TextToSpeech};
use fleur_llm::{ChatBackend, OpenAiBackend};
use fleur_server::{create_router, AppState, ElevenLabsSynthesizer, HttpTranscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,fleur_server=debug")),
        )
        .init();

    let env = std::env::var("FLEUR_ENV").ok();
    let settings = load_settings(env.as_deref()).context("failed to load settings")?;

    let backend: Option<Arc<dyn ChatBackend>> = match OpenAiBackend::new(settings.llm.clone()) {
        Ok(backend) => {
            if !backend.is_available() {
                warn!("no LLM API key configured, default replies degrade to the apology");
            }
            Some(Arc::new(backend))
        }
        Err(error) => {
            warn!(%error, "LLM backend unavailable, default replies degrade to the apology");
            None
        }
    };

    let engine = Arc::new(TurnEngine::new(ServiceCatalog::default(), backend));

    let transcriber: Option<Arc<dyn SpeechToText>> = match &settings.speech.asr_endpoint {
        Some(endpoint) => match HttpTranscriber::new(endpoint.clone()) {
            Ok(t) => {
                info!(endpoint, "ASR collaborator configured");
                Some(Arc::new(t))
            }
            Err(error) => {
                warn!(%error, "failed to create ASR client, audio turns arrive empty");
                None
            }
        },
        None => {
            info!("no ASR endpoint configured, audio turns arrive empty");
            None
        }
    };

    let synthesizer: Option<Arc<dyn TextToSpeech>> =
        match ElevenLabsSynthesizer::new(settings.speech.clone()) {
            Ok(s) => Some(Arc::new(s)),
            Err(error) => {
                warn!(%error, "failed to create TTS client, replies are text-only");
                None
            }
        };

    let registry = Arc::new(SessionRegistry::new(
        Duration::from_secs(settings.session.timeout_minutes * 60),
        settings.session.max_sessions,
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweep_handle = registry.start_sweep_task(
        Duration::from_secs(settings.session.sweep_interval_secs),
        shutdown_rx,
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState::new(settings, registry, engine, transcriber, synthesizer);
    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "salon voice agent listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutting down");
    let _ = shutdown_tx.send(true);
    let _ = sweep_handle.await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to install shutdown handler");
    }
}
