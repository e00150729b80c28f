use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

mod ai;
mod routes;

const DEFAULT_BIND: &str = "0.0.0.0:3001";

#[derive(Clone)]
pub struct AppState {
    pub ai_api_key: Option<String>,
    pub model: String,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(ai_api_key: Option<String>, model: String) -> Self {
        Self {
            ai_api_key,
            model,
            http: reqwest::Client::new(),
        }
    }

    /// Read `ANTHROPIC_API_KEY` and `MAK3D_MODEL`
    fn from_env() -> Self {
        let ai_api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model = std::env::var("MAK3D_MODEL").unwrap_or_else(|_| ai::DEFAULT_MODEL.to_string());
        Self::new(ai_api_key, model)
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/generate", post(routes::generate))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info".into()),
        )
        .init();

    let state = AppState::from_env();
    if state.ai_api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY not set, generation requests will be refused");
    }
    tracing::info!("Using model {}", state.model);

    let bind = std::env::var("MAK3D_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {bind}: {e}");
            return;
        }
    };
    tracing::info!("Server running on http://{bind}");
    if let Err(e) = axum::serve(listener, app(state)).await {
        tracing::error!("Server stopped: {e}");
    }
}
