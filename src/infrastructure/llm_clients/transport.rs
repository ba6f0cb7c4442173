use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// POSTs a JSON body and returns the response body text.
///
/// Implementations report HTTP statuses >= 400 as [`AppError::ApiError`] with
/// the raw body attached.
#[async_trait]
pub trait HttpTransport {
    async fn post_json(&self, endpoint: &Url, body: String) -> Result<String>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &LLMConfig) -> Result<Self> {
        Self::from_builder(Self::builder(config))
    }

    fn builder(config: &LLMConfig) -> reqwest::ClientBuilder {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
    }

    fn from_builder(builder: reqwest::ClientBuilder) -> Result<Self> {
        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, endpoint: &Url, body: String) -> Result<String> {
        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::ApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        response
            .text()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to read response body: {}", e)))
    }
}
