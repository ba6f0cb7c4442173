use crate::application::{FeedbackUseCase, GradeReportUseCase};
use crate::domain::error::Result;
use crate::infrastructure::config::{AppConfig, ConfigService};
use crate::infrastructure::llm_clients::{GeminiClient, LLMClient};
use std::sync::Arc;

pub struct AppState {
    pub config: AppConfig,
    pub config_service: ConfigService,
    pub grade_report_use_case: GradeReportUseCase,
    pub feedback_use_case: Arc<FeedbackUseCase>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let llm_client: Arc<dyn LLMClient + Send + Sync> =
            Arc::new(GeminiClient::new(&config.gemini)?);
        Ok(Self::with_parts(config, ConfigService::new(), llm_client))
    }

    pub fn with_parts(
        config: AppConfig,
        config_service: ConfigService,
        llm_client: Arc<dyn LLMClient + Send + Sync>,
    ) -> Self {
        Self {
            config,
            config_service,
            grade_report_use_case: GradeReportUseCase::new(),
            feedback_use_case: Arc::new(FeedbackUseCase::new(llm_client)),
        }
    }
}
