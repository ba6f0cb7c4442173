use super::transport::{HttpTransport, ReqwestTransport};
use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::shared::json_text::{encode_request, extract_first_text};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

pub const MISSING_API_KEY_MESSAGE: &str =
    "Gemini API key is not set. Use `key set` or set GEMINI_API_KEY env var.";

pub struct GeminiClient {
    transport: Arc<dyn HttpTransport + Send + Sync>,
}

impl GeminiClient {
    pub fn new(config: &LLMConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn HttpTransport + Send + Sync>) -> Self {
        Self { transport }
    }

    fn api_key(config: &LLMConfig) -> Result<&str> {
        config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::ConfigError(MISSING_API_KEY_MESSAGE.to_string()))
    }

    /// `{base_url}/{model}:generateContent` without credentials, safe to log.
    fn base_endpoint(config: &LLMConfig) -> String {
        format!(
            "{}/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model.trim()
        )
    }

    fn endpoint(config: &LLMConfig, api_key: &str) -> Result<Url> {
        let base = Self::base_endpoint(config);
        Url::parse_with_params(&base, &[("key", api_key)])
            .map_err(|e| AppError::ConfigError(format!("Invalid Gemini endpoint '{}': {}", base, e)))
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, config: &LLMConfig, prompt: &str) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let url = Self::endpoint(config, api_key)?;
        let body = encode_request(prompt);

        debug!(
            endpoint = %Self::base_endpoint(config),
            body_bytes = body.len(),
            "Sending Gemini generateContent request"
        );

        let raw = self.transport.post_json(&url, body).await.map_err(|err| {
            warn!(error = %err, model = %config.model, "Gemini request failed");
            err
        })?;

        Ok(extract_first_text(&raw))
    }
}
