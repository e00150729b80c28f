//! Client side of the generation collaborator

use std::sync::Arc;

use async_trait::async_trait;
use shared::{GenerateRequest, GenerateResponse};

/// Why a generation request produced no usable reply
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation service returned status {0}")]
    Status(u16),
    #[error("unreadable reply: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request was dropped before completing")]
    Cancelled,
}

/// Something that turns a prompt and the current scene into a proposal
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenerationError>;
}

/// Talks to the generation server over HTTP
pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGenerator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenerationError> {
        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }

        // Read loosely: a malformed object list is "no objects", not an error
        let body: serde_json::Value = serde_json::from_slice(&response.bytes().await?)?;
        Ok(GenerateResponse::from_value(&body))
    }
}

/// Generator plus the runtime its requests are spawned on
#[derive(Clone)]
pub struct GenerationDriver {
    pub(crate) generator: Arc<dyn Generator>,
    pub(crate) runtime: tokio::runtime::Handle,
}

impl GenerationDriver {
    pub fn new(generator: Arc<dyn Generator>, runtime: tokio::runtime::Handle) -> Self {
        Self { generator, runtime }
    }
}

impl std::fmt::Debug for GenerationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationDriver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_joins_cleanly() {
        assert_eq!(
            HttpGenerator::new("http://localhost:3001/").generate_url(),
            "http://localhost:3001/api/generate"
        );
        assert_eq!(
            HttpGenerator::new("http://gen").generate_url(),
            "http://gen/api/generate"
        );
    }

    #[test]
    fn test_status_error_message() {
        assert_eq!(
            GenerationError::Status(502).to_string(),
            "generation service returned status 502"
        );
    }
}
