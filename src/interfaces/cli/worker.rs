use crate::application::FeedbackUseCase;
use crate::domain::feedback::FeedbackReport;
use crate::domain::llm_config::LLMConfig;
use crate::domain::student::Student;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info};

pub const WAITING_MESSAGE: &str = "Contacting Gemini for feedback... Please wait.";

#[derive(Debug)]
pub enum FeedbackOutcome {
    Ready(FeedbackReport),
    Failed(String),
}

impl FeedbackOutcome {
    pub fn display_text(&self) -> String {
        match self {
            FeedbackOutcome::Ready(report) => format!("AI Feedback:\n\n{}", report.feedback),
            FeedbackOutcome::Failed(message) => format!("AI Error: {}", message),
        }
    }
}

/// Runs the feedback request on a background task and hands the outcome back
/// over a oneshot channel. No cancellation and no retry.
pub fn spawn_feedback(
    use_case: Arc<FeedbackUseCase>,
    config: LLMConfig,
    student: Student,
) -> oneshot::Receiver<FeedbackOutcome> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let outcome = match use_case.execute(&config, &student).await {
            Ok(report) => {
                info!(student = %report.student_name, "Feedback received");
                FeedbackOutcome::Ready(report)
            }
            Err(err) => {
                error!(error = %err, "Feedback request failed");
                FeedbackOutcome::Failed(err.to_string())
            }
        };
        // The receiver is gone only if the caller stopped waiting.
        let _ = tx.send(outcome);
    });

    rx
}

/// Waits for the background task; a dropped sender becomes a failure outcome.
pub async fn await_feedback(rx: oneshot::Receiver<FeedbackOutcome>) -> FeedbackOutcome {
    rx.await.unwrap_or_else(|_| {
        FeedbackOutcome::Failed("Feedback task ended unexpectedly".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{AppError, Result};
    use crate::infrastructure::llm_clients::LLMClient;
    use async_trait::async_trait;

    struct CannedClient {
        reply: std::result::Result<&'static str, u16>,
    }

    #[async_trait]
    impl LLMClient for CannedClient {
        async fn generate(&self, _config: &LLMConfig, _prompt: &str) -> Result<String> {
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(AppError::ApiError {
                    status,
                    body: "quota exceeded".to_string(),
                }),
            }
        }
    }

    fn use_case(reply: std::result::Result<&'static str, u16>) -> Arc<FeedbackUseCase> {
        Arc::new(FeedbackUseCase::new(Arc::new(CannedClient { reply })))
    }

    fn student() -> Student {
        Student::new("Asha", vec!["Math".to_string()], vec![91.0])
    }

    #[tokio::test]
    async fn test_spawn_feedback_success_text() {
        let rx = spawn_feedback(use_case(Ok("Excellent progress.")), LLMConfig::default(), student());
        let outcome = await_feedback(rx).await;
        assert_eq!(outcome.display_text(), "AI Feedback:\n\nExcellent progress.");
    }

    #[tokio::test]
    async fn test_spawn_feedback_error_becomes_text() {
        let rx = spawn_feedback(use_case(Err(429)), LLMConfig::default(), student());
        let outcome = await_feedback(rx).await;
        assert_eq!(
            outcome.display_text(),
            "AI Error: Gemini API error: HTTP 429 - quota exceeded"
        );
    }

    #[tokio::test]
    async fn test_await_feedback_dropped_sender() {
        let (tx, rx) = oneshot::channel::<FeedbackOutcome>();
        drop(tx);
        let outcome = await_feedback(rx).await;
        assert!(matches!(outcome, FeedbackOutcome::Failed(_)));
    }
}
