//! HTTP surface: the chat endpoint, liveness, and the SPA bundle

use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::chat::ChatService;
use crate::config::ClimateConfig;
use crate::gemini::GeminiClient;
use crate::log_store::ConversationLogger;
use crate::models::{ChatError, ChatReply, ChatRequest};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// `None` when the Gemini API key is unconfigured; every chat
    /// request is then answered with the fixed configuration error
    /// before any outbound call.
    pub service: Option<Arc<ChatService>>,
}

/// Build handler state from configuration. The clients are constructed
/// once here and reused across requests.
pub fn build_state(config: &ClimateConfig) -> Result<AppState> {
    let logger = ConversationLogger::new(
        config.mongo.uri.clone(),
        config.mongo.database.clone(),
        config.mongo.collection.clone(),
    );
    if !logger.is_enabled() {
        warn!("MONGO_URI is not set; conversation logging is disabled");
    }

    let service = match &config.gemini.api_key {
        Some(key) if !key.is_empty() => {
            let gemini = GeminiClient::new(
                key.clone(),
                config.gemini.base_url.clone(),
                config.gemini.model.clone(),
            )?;
            info!(model = gemini.model(), "Gemini client configured");
            Some(Arc::new(ChatService::new(gemini, logger)))
        }
        _ => {
            warn!("GEMINI_API_KEY is not set; chat requests will be rejected");
            None
        }
    };

    Ok(AppState { service })
}

/// Assemble the router: the API, permissive CORS for the browser front
/// end, and the built SPA bundle as the fallback.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/health", get(health))
        .fallback_service(ServeDir::new("frontend/dist"))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn run(config: ClimateConfig) -> Result<()> {
    let state = build_state(&config)?;
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let Some(service) = state.service else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatError::new("Gemini API key not configured")),
        )
            .into_response();
    };

    match service.respond(&request.message).await {
        Ok(reply) => Json(ChatReply::new(reply)).into_response(),
        Err(e) => {
            error!("Error in chat handler: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatError::new(format!("Sorry, I ran into a problem: {e}"))),
            )
                .into_response()
        }
    }
}
