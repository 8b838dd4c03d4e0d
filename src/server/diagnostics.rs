//! Operator routes for checking provider connectivity. Mounted only when
//! `server.diagnostics` is on.

use super::handlers::AppState;
use super::types::{
    ErrorResponse, GenerateQuery, GenerateResponse, ProbeResponse, ProviderStatus, StatusResponse,
};
use crate::config::{ProviderKind, mask_secret};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::time::Instant;
use tracing::info;

pub const PROBE_QUESTION: &str = "Cześć! Jak się masz?";

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let config = &state.config;
    let providers = &config.providers;

    let describe = |kind: ProviderKind| {
        let (endpoint, credential, timeout_secs) = match kind {
            ProviderKind::Gemini => (
                &providers.gemini.url,
                providers.gemini.api_key.as_deref(),
                providers.gemini.timeout_secs,
            ),
            ProviderKind::HuggingFace => (
                &providers.huggingface.url,
                providers.huggingface.token.as_deref(),
                providers.huggingface.timeout_secs,
            ),
        };
        ProviderStatus {
            name: kind.to_string(),
            configured: providers.is_configured(kind),
            endpoint: endpoint.clone(),
            credential: credential.map(mask_secret),
            timeout_secs,
        }
    };

    let chain: Vec<String> = state
        .generator
        .provider_names()
        .into_iter()
        .map(String::from)
        .collect();

    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        primary: chain.first().cloned(),
        chain,
        providers: vec![
            describe(ProviderKind::Gemini),
            describe(ProviderKind::HuggingFace),
        ],
        fallback_responses: state.generator.fallback().len(),
        min_response_chars: state.generator.min_response_chars(),
    })
}

pub async fn probe_provider(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ProbeResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!("Probing provider {}", name);

    let started = Instant::now();
    let result = state
        .generator
        .probe(&name, PROBE_QUESTION)
        .await
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Provider not configured: {}", name),
                }),
            )
        })?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let (ok, text, error) = match result {
        Ok(text) => (true, Some(text), None),
        Err(e) => (false, None, Some(e.to_string())),
    };

    Ok(Json(ProbeResponse {
        provider: name,
        ok,
        text,
        error,
        elapsed_ms,
    }))
}

pub async fn generate(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> Json<GenerateResponse> {
    let question = query
        .q
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(|| "Cześć!".to_string());

    let started = Instant::now();
    let response = state.generator.generate(&question).await;

    Json(GenerateResponse {
        question,
        response,
        elapsed_ms: started.elapsed().as_millis() as u64,
    })
}
