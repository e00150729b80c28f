use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::ai::{self, AiError};
use crate::AppState;
use shared::{GenerateRequest, GenerateResponse};

/// Health check
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "generation": state.ai_api_key.is_some(),
    }))
}

/// Prompt + current scene → proposed replacement scene
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<Value>)> {
    tracing::info!(
        "Generate request: {:?} ({} objects in scene)",
        request.prompt,
        request.objects.len()
    );
    ai::generate(&state, &request).await.map(Json).map_err(|e| {
        tracing::error!("Generation error: {e}");
        (status_for(&e), Json(json!({ "error": e.to_string() })))
    })
}

fn status_for(error: &AiError) -> StatusCode {
    match error {
        AiError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
        AiError::Transport(_) | AiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        AiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_generation_availability() {
        let state = AppState::new(None, ai::DEFAULT_MODEL.to_string());
        let Json(body) = health(State(state)).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["generation"], false);
    }

    #[tokio::test]
    async fn test_generate_without_key_is_unavailable() {
        let state = AppState::new(None, ai::DEFAULT_MODEL.to_string());
        let request = GenerateRequest {
            prompt: "a tree".into(),
            objects: vec![],
        };
        let (status, Json(body)) = generate(State(state), Json(request)).await.unwrap_err();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_upstream_errors_map_to_bad_gateway() {
        assert_eq!(status_for(&AiError::Upstream(529)), StatusCode::BAD_GATEWAY);
    }
}
