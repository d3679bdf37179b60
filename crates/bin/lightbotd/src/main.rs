//! # lightbotd — lightbot daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Construct the LUIS recognizer and the selected lighting client
//! - Construct application services, injecting adapters via port traits
//! - Build the axum router and serve it
//! - Handle graceful shutdown (SIGTERM/SIGINT), stopping every color cycle
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use lightbot_adapter_http_axum::state::AppState;
use lightbot_adapter_lifx::LifxClient;
use lightbot_adapter_luis::LuisRecognizer;
use lightbot_adapter_virtual::VirtualLights;
use lightbot_app::intent_router::IntentRouter;
use lightbot_app::ports::LightingClient;
use lightbot_app::services::conversation_service::ConversationService;
use lightbot_app::services::light_service::LightService;

use crate::config::{Config, LightingBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let recognizer =
        LuisRecognizer::new(&config.nlu.luis).context("failed to build LUIS recognizer")?;

    match config.lighting.backend {
        LightingBackend::Lifx => {
            let lights =
                LifxClient::new(&config.lighting.lifx).context("failed to build LIFX client")?;
            serve(&config, recognizer, lights).await
        }
        LightingBackend::Virtual => {
            tracing::warn!("using virtual lights, no real bulb will change");
            serve(&config, recognizer, VirtualLights::default()).await
        }
    }
}

async fn serve<L>(config: &Config, recognizer: LuisRecognizer, lights: L) -> anyhow::Result<()>
where
    L: LightingClient + Clone + Send + Sync + 'static,
{
    // Services
    let light_service = LightService::new(
        lights,
        config.light_targets()?,
        config.effect_settings()?,
        config.cycle_settings(),
    );
    let router = IntentRouter::new(light_service, config.nlu.intent_threshold);
    let service = Arc::new(ConversationService::new(recognizer, router));

    // HTTP
    if config.app_password().is_none() {
        tracing::warn!("no bot app password configured, webhook is unauthenticated");
    }
    let state = AppState::new(Arc::clone(&service), config.app_password());
    let app = lightbot_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        %bind_addr,
        backend = ?config.lighting.backend,
        app_id = %config.bot.app_id,
        "lightbotd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.shutdown();
    tracing::info!("lightbotd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to register SIGTERM handler");
                ctrl_c.await.ok();
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
    tracing::info!("shutdown signal received");
}
