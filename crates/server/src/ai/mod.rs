use shared::{GenerateRequest, GenerateResponse};

use crate::AppState;

const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Sent back when the model proposed nothing usable
pub const NO_OBJECTS_MESSAGE: &str =
    "The AI could not produce a valid 3D structure from that description. Try a more specific prompt.";

const SYSTEM_PROMPT: &str = r##"
You are a 3D structure engineer. You build detailed models out of simple primitives.

Design rules:
1. Complexity: do not answer with a single block. Break the object into 10-50 component parts.
   A car gets separate wheels (cylinders), axles, chassis and bumpers (cubes), lights (spheres).
   A house gets walls, pillars, roof segments, a chimney, steps and windows.
2. Decomposition: only CUBE, SPHERE, CYLINDER and CONE are available.
3. Positioning: place parts so the model is centered roughly at [0, 0, 0]. Y is up.
4. Scaling: each primitive is a unit shape; use scale to flatten, stretch or thin it.
5. Color: pick a harmonious palette of hex colors.

The user's current scene is given for context. Your parts replace it entirely.

Respond with JSON only:
{
    "responseMessage": "short description of what you built",
    "addedObjects": [
        {
            "name": "Front_Left_Wheel",
            "type": "CYLINDER",
            "position": [x, y, z],
            "rotation": [x, y, z],
            "scale": [x, y, z],
            "color": "#RRGGBB"
        }
    ]
}
Rotation is Euler XYZ in radians.
"##;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("ANTHROPIC_API_KEY not set")]
    MissingApiKey,
    #[error("request to the model failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model API returned status {0}")]
    Upstream(u16),
    #[error("failed to encode scene: {0}")]
    Encode(#[from] serde_json::Error),
}

pub async fn generate(
    state: &AppState,
    request: &GenerateRequest,
) -> Result<GenerateResponse, AiError> {
    let api_key = state.ai_api_key.as_ref().ok_or(AiError::MissingApiKey)?;

    let scene_context = serde_json::to_string(&request.objects)?;

    let response = state
        .http
        .post(ANTHROPIC_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", "2023-06-01")
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "model": state.model,
            "max_tokens": 8192,
            "system": SYSTEM_PROMPT,
            "messages": [
                {
                    "role": "user",
                    "content": format!(
                        "Current scene:\n{}\n\nUser request: {}",
                        scene_context, request.prompt
                    )
                }
            ]
        }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AiError::Upstream(status.as_u16()));
    }

    let body: serde_json::Value = response.json().await?;
    let reply = parse_reply(&reply_text(&body));
    tracing::info!("Model proposed {} objects", reply.added_objects.len());
    Ok(reply)
}

/// Concatenated text blocks of a Messages API reply
fn reply_text(body: &serde_json::Value) -> String {
    body["content"]
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|block| block["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// Turn the model's text into a reply, tolerating fences and stray prose
pub fn parse_reply(text: &str) -> GenerateResponse {
    let body = strip_code_fences(text);
    let parsed = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .or_else(|| {
            let start = body.find('{')?;
            let end = body.rfind('}')?;
            serde_json::from_str(body.get(start..=end)?).ok()
        });

    let mut reply = match parsed {
        Some(value) => GenerateResponse::from_value(&value),
        None => GenerateResponse {
            response_message: body.to_string(),
            added_objects: Vec::new(),
        },
    };
    if reply.added_objects.is_empty() {
        reply.response_message = NO_OBJECTS_MESSAGE.to_string();
    }
    reply
}

/// Strip a surrounding ```json ... ``` fence, if any
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`) on the opening line
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
