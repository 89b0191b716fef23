//! BiasRadar Server
//!
//! Scans text for social bias across gender, race, age, disability,
//! culture, politics, religion, LGBTQ+, socioeconomic status, truth-seeking,
//! ideological neutrality and tone. Provides REST API endpoints for:
//!
//! - Bias scanning with a word-level heatmap
//! - AI-assisted rewriting (when an OpenAI-compatible key is configured)
//! - Bias type listing
//!
//! ## Architecture
//!
//! Detection runs in `bias-engine` on the blocking pool. The optional AI
//! pass goes through an OpenAI-compatible client and falls back to the
//! rule-based result on error or timeout. Requests are rate limited per IP
//! via tower-governor.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use bias_engine::{BiasEngine, EngineConfig, PolicyProfile};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod openai;
#[cfg(test)]
mod tests;

use api::{handle_bias_types, handle_fix, handle_health, handle_scan};
use openai::OpenAiClient;

/// Command-line arguments for the BiasRadar server
#[derive(Parser, Debug)]
#[command(name = "biasradar-server")]
#[command(about = "BiasRadar server for bias scanning and AI-assisted rewriting")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Policy profile: "strict" or "context_aware" (overrides the config file)
    #[arg(long)]
    profile: Option<PolicyProfile>,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Maximum accepted text length in characters
    #[arg(long, default_value = "10000")]
    max_text_chars: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<BiasEngine>,
    /// Present only when an API key is configured
    pub ai: Option<Arc<OpenAiClient>>,
    pub max_text_chars: usize,
}

/// Routes, CORS and request tracing, without rate limiting
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/bias-types", get(handle_bias_types))
        .route("/api/scan", post(handle_scan))
        .route("/api/fix", post(handle_fix))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(profile) = args.profile {
        config.profile = profile;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BiasRadar server on {}:{}", args.host, args.port);

    let config = load_config(&args)?;
    let engine = BiasEngine::with_config(config);
    engine
        .lexicon()
        .validate()
        .context("Built-in lexicon failed validation")?;

    let ai = OpenAiClient::from_env()
        .context("Failed to create AI client")?
        .map(Arc::new);
    match &ai {
        Some(client) => info!("AI features enabled (model {})", client.model()),
        None => warn!("No OpenAI API key configured; AI validation and /api/fix are disabled"),
    }

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .context("Failed to create rate limiter config")?,
    );

    let state = AppState {
        engine: Arc::new(engine),
        ai,
        max_text_chars: args.max_text_chars,
    };

    let app = build_router(state).layer(GovernorLayer {
        config: governor_conf,
    });

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Maximum text length: {} characters", args.max_text_chars);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
