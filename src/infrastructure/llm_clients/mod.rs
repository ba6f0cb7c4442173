pub mod gemini;
pub mod transport;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;

pub use gemini::GeminiClient;
pub use transport::{HttpTransport, ReqwestTransport};

#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &LLMConfig, prompt: &str) -> Result<String>;
}
