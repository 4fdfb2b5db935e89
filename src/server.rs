//! HTTP transport
//!
//! `POST /extract` runs the matcher on `raw_text`; `GET /health` is a liveness
//! probe.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::dictionary::Dictionary;
use crate::matcher::{MatchResult, ProductMatcher};

/// Shared request state (read-only)
#[derive(Clone)]
pub struct AppState {
    pub dictionary: Arc<Dictionary>,
    pub matcher: ProductMatcher,
}

impl AppState {
    pub fn new(dictionary: Dictionary, matcher: ProductMatcher) -> Self {
        Self {
            dictionary: Arc::new(dictionary),
            matcher,
        }
    }
}

/// Extraction request
#[derive(Debug, Deserialize)]
pub struct ExtractionRequest {
    #[serde(default)]
    pub raw_text: String,
}

/// Extraction response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ExtractionResponse {
    pub product: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub status: String,
    /// Wall time of the match, e.g. `"0.1234 ms"`
    pub time_taken: String,
}

impl ExtractionResponse {
    pub fn new(result: MatchResult, elapsed: Duration) -> Self {
        let status = result.status().to_string();
        let time_taken = format!("{:.4} ms", elapsed.as_micros() as f64 / 1000.0);

        match result {
            MatchResult::MatchedFuzzyMax(m) => Self {
                product: Some(m.product),
                brand: Some(m.brand),
                category: Some(m.category),
                status,
                time_taken,
            },
            MatchResult::NoMatch | MatchResult::TooManyCandidates => Self {
                product: None,
                brand: None,
                category: None,
                status,
                time_taken,
            },
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/extract", post(extract_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn extract_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Rejected extraction request: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid JSON body").into_response();
        }
    };

    let start = Instant::now();
    let result = state.matcher.extract(&request.raw_text, &state.dictionary);
    let elapsed = start.elapsed();

    tracing::debug!(status = result.status(), ?elapsed, "extraction finished");

    Json(ExtractionResponse::new(result, elapsed)).into_response()
}

async fn health_handler() -> &'static str {
    "OK"
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &AppConfig, state: AppState) -> Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server starting on {}...", addr);
    tracing::info!("  POST /extract  - match raw text");
    tracing::info!("  GET  /health   - liveness");

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}
