//! moodgate-gateway: HTTP surface for mood-routed streaming replies.
//!
//! Routes:
//! - `POST /api/chat`       – `META:<decision>\n` preamble, then the generated reply (text/plain).
//! - `POST /api/v1/mood`    – the decision as JSON, no generation.
//! - `GET  /api/v1/health`  – liveness plus app identity and LLM mode.

mod error;
mod handlers;

use axum::extract::State;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use moodgate_core::{GatewayConfig, ResponseRouter};
use moodgate_skills::ModelRouter;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: Arc<GatewayConfig>,
    pub router: Arc<ResponseRouter>,
}

#[tokio::main]
async fn main() {
    // Load .env first. The LLM key stays in the backend only.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = dotenv {
        tracing::info!("[moodgate-gateway] .env not loaded: {} (using system environment)", e);
    }

    let config = match GatewayConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("[moodgate-gateway] Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let model_router = ModelRouter::from_config(&config);
    if let Some(e) = model_router.missing_api_key() {
        tracing::warn!(
            "[moodgate-gateway] Live mode without credentials: {}. Chat requests will be rejected until it is set.",
            e
        );
    }

    moodgate_core::cues::warm_up();

    let addr = config.bind_addr();
    let state = AppState {
        config: Arc::new(config),
        router: Arc::new(ResponseRouter::new(Arc::new(model_router))),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("[moodgate-gateway] Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        app = %state.config.app_name,
        llm_mode = %state.config.mode().as_str(),
        "[moodgate-gateway] Listening on http://{}",
        addr
    );

    if let Err(e) = axum::serve(listener, build_app(state)).await {
        tracing::error!("[moodgate-gateway] Server error: {}", e);
        std::process::exit(1);
    }
}

fn build_app(state: AppState) -> Router {
    // CORS: allow local UI origins (dev servers on 3000-3099 / 5173).
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &axum::http::HeaderValue, _| {
            let s = origin.to_str().unwrap_or("");
            let local = s.starts_with("http://localhost:") || s.starts_with("http://127.0.0.1:");
            let port = s
                .rsplit(':')
                .next()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(0);
            local && ((3000..=3099).contains(&port) || port == 5173)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/v1/mood", post(handlers::chat::mood))
        .route("/api/v1/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// GET /api/v1/health
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "app_name": state.config.app_name,
        "llm_mode": state.config.mode().as_str(),
        "generator": state.router.generator_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
