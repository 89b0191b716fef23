//! API handlers for the BiasRadar server
//!
//! Provides REST endpoints for:
//! - Bias scanning (rule-based, optionally AI-assisted)
//! - AI rewriting of biased text
//! - Bias type listing

use axum::{extract::State, Json};
use bias_engine::ScanOptions;
use serde::{Deserialize, Serialize};
use shared_types::{BiasType, ScanResult};
use tracing::{debug, info, warn};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "biasradar-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Bias type listing response
#[derive(Serialize)]
pub struct BiasTypesResponse {
    pub success: bool,
    pub profile: String,
    pub bias_types: Vec<BiasTypeInfo>,
    pub count: usize,
}

/// One detectable bias type
#[derive(Serialize)]
pub struct BiasTypeInfo {
    pub name: BiasType,
    /// "lexicon" or "pattern"
    pub detector: &'static str,
    /// Phrases scanned under the active profile (0 for pattern detectors)
    pub phrase_count: usize,
}

/// Handler: GET /api/bias-types
pub async fn handle_bias_types(State(state): State<AppState>) -> Json<BiasTypesResponse> {
    let profile = state.engine.config().profile;
    let lexicon = state.engine.lexicon();

    let bias_types: Vec<BiasTypeInfo> = BiasType::DETECTABLE
        .iter()
        .map(|bias_type| match bias_type {
            BiasType::PatternStereotype => BiasTypeInfo {
                name: *bias_type,
                detector: "pattern",
                phrase_count: 0,
            },
            _ => BiasTypeInfo {
                name: *bias_type,
                detector: "lexicon",
                phrase_count: lexicon.phrase_count(*bias_type, profile),
            },
        })
        .collect();

    let count = bias_types.len();

    Json(BiasTypesResponse {
        success: true,
        profile: profile.to_string(),
        bias_types,
        count,
    })
}

/// Scan request body
#[derive(Deserialize)]
pub struct ScanRequest {
    /// Text to scan
    #[serde(default)]
    pub text: String,

    /// Restrict the scan to these bias types (all when absent)
    #[serde(default)]
    pub bias_types: Option<Vec<String>>,

    /// Also ask the AI validator for findings
    #[serde(default)]
    pub enable_ai: bool,
}

/// Scan response: the scan result plus a one-line summary
#[derive(Serialize, Deserialize)]
pub struct ScanResponse {
    #[serde(flatten)]
    pub result: ScanResult,
    pub summary: String,
}

/// Reject empty or oversized input before any work is done
pub(crate) fn validate_text(text: &str, max_chars: usize) -> Result<(), ServerError> {
    if text.trim().is_empty() {
        return Err(ServerError::InvalidRequest("Text cannot be empty".to_string()));
    }

    let len = text.chars().count();
    if len > max_chars {
        return Err(ServerError::TextTooLong {
            len,
            max: max_chars,
        });
    }

    Ok(())
}

/// Handler: POST /api/scan
pub async fn handle_scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ServerError> {
    let mode = if req.enable_ai { "ai" } else { "standard" };
    info!(mode, chars = req.text.chars().count(), "Scan request");

    validate_text(&req.text, state.max_text_chars)?;

    let options = match &req.bias_types {
        Some(names) => ScanOptions::with_bias_types(names),
        None => ScanOptions::default(),
    };
    debug!(selection = ?options.selection, "Detector selection");

    let result = match (&state.ai, req.enable_ai) {
        (Some(ai), true) => {
            state
                .engine
                .scan_hybrid(&req.text, &options, ai.as_ref())
                .await
        }
        (ai, enable_ai) => {
            if enable_ai && ai.is_none() {
                warn!("AI validation requested but no API key is configured");
            }
            let engine = state.engine.clone();
            let text = req.text;
            tokio::task::spawn_blocking(move || engine.scan_with(&text, &options))
                .await
                .map_err(|e| ServerError::Internal(format!("Scan task failed: {}", e)))?
        }
    };

    info!(
        score = result.score,
        issues = result.issue_count,
        method = ?result.detection_method,
        "Scan complete"
    );

    Ok(Json(ScanResponse {
        summary: result.summary(),
        result,
    }))
}

/// Fix request body
#[derive(Deserialize)]
pub struct FixRequest {
    #[serde(default)]
    pub text: String,
}

/// Fix response
#[derive(Serialize, Deserialize)]
pub struct FixResponse {
    pub original_text: String,
    pub fixed_text: String,
    pub improvements: Vec<String>,
}

/// Handler: POST /api/fix
pub async fn handle_fix(
    State(state): State<AppState>,
    Json(req): Json<FixRequest>,
) -> Result<Json<FixResponse>, ServerError> {
    info!(chars = req.text.chars().count(), "Fix request");

    let ai = state.ai.as_ref().ok_or(ServerError::AiNotConfigured)?;
    validate_text(&req.text, state.max_text_chars)?;

    let outcome = ai.fix_text(&req.text).await.map_err(|e| {
        warn!(error = %e, "Fix request failed");
        ServerError::from(e)
    })?;

    Ok(Json(FixResponse {
        original_text: req.text,
        fixed_text: outcome.fixed_text,
        improvements: outcome.improvements,
    }))
}
