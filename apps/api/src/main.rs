mod config;
mod drafts;
mod errors;
mod expansion;
mod generation;
mod llm_client;
mod models;
mod posts;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::drafts::service::DraftService;
use crate::expansion::expander::ContentExpander;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::posts::service::PostService;
use crate::posts::webhook::WebhookPublisher;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::fs::JsonFileBackend;
use crate::store::{RecordStore, Stamps};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Postcraft API v{}", env!("CARGO_PKG_VERSION"));

    let timeout = Duration::from_secs(config.generation_timeout_secs);

    // Initialize text generator
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        timeout,
    )?
    .with_base_url(config.gemini_base_url.clone());
    info!("Gemini client initialized (model: {})", gemini.model());
    let generator: Arc<dyn TextGenerator> = Arc::new(gemini);

    let expander = ContentExpander::new(generator.clone(), config.expansion_mode);
    info!("Directive expansion mode: {:?}", config.expansion_mode);

    // Initialize JSON record stores
    let drafts_backend = JsonFileBackend::new(config.drafts_path());
    let posts_backend = JsonFileBackend::new(config.posts_path());
    info!(
        "Record stores: drafts={}, posts={}",
        drafts_backend.path().display(),
        posts_backend.path().display()
    );

    // Initialize webhook publisher
    let publisher = Arc::new(WebhookPublisher::new(config.webhook_url.clone(), timeout)?);

    // Build app state
    let state = AppState {
        drafts: Arc::new(DraftService::new(RecordStore::new(
            Arc::new(drafts_backend),
            Stamps::DRAFTS,
        ))),
        posts: Arc::new(PostService::new(
            RecordStore::new(Arc::new(posts_backend), Stamps::POSTS),
            expander.clone(),
            publisher,
        )),
        generator,
        expander,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
