mod prompts;

use crate::domain::error::{AppError, Result};
use crate::domain::feedback::FeedbackReport;
use crate::domain::llm_config::LLMConfig;
use crate::domain::student::Student;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;
use tracing::info;

use prompts::build_feedback_prompt;

pub struct FeedbackUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
}

impl FeedbackUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    /// Form checks that must pass before a request is started.
    pub fn validate(student: &Student) -> Result<()> {
        if student.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Please enter the student's name.".to_string(),
            ));
        }
        if student.subjects.is_empty()
            || student.marks.is_empty()
            || student.subjects.len() != student.marks.len()
        {
            return Err(AppError::ValidationError(
                "Please provide matching subjects and marks.".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn execute(&self, config: &LLMConfig, student: &Student) -> Result<FeedbackReport> {
        Self::validate(student)?;

        let prompt = build_feedback_prompt(student);
        info!(
            subjects = student.subjects.len(),
            prompt_chars = prompt.chars().count(),
            "Requesting feedback"
        );

        let feedback = self.llm_client.generate(config, &prompt).await?;

        Ok(FeedbackReport::new(student.name.clone(), feedback))
    }
}
