use super::types::{ChatRequest, ChatResponse, ErrorResponse};
use crate::{config::Config, generator::ResponseGenerator};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{info, warn};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub const EMPTY_MESSAGE_ERROR: &str = "Pusta wiadomość";

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ResponseGenerator>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(generator: ResponseGenerator, config: Config) -> Self {
        Self {
            generator: Arc::new(generator),
            config: Arc::new(config),
        }
    }
}

pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected chat request: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        )
    })?;
    let message = request.message.trim();

    if message.is_empty() {
        warn!("Rejected empty chat message");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: EMPTY_MESSAGE_ERROR.to_string(),
            }),
        ));
    }

    info!("Received chat message ({} chars)", message.chars().count());

    let response = state.generator.generate(message).await;

    Ok(Json(ChatResponse {
        response,
        timestamp: chrono::Local::now().format("%H:%M").to_string(),
    }))
}
