use super::state::AppState;
use super::worker::{await_feedback, spawn_feedback, FeedbackOutcome, WAITING_MESSAGE};
use super::{FeedbackArgs, KeyCommand, StudentArgs};
use crate::application::FeedbackUseCase;
use crate::domain::error::{AppError, Result};
use crate::domain::student::Student;
use crate::infrastructure::llm_clients::gemini::MISSING_API_KEY_MESSAGE;
use crate::shared::form_input::parse_student;
use std::io::Write;
use tracing::info;

fn student_from_args(args: &StudentArgs) -> Result<Student> {
    parse_student(&args.name, &args.subjects, &args.marks)
}

fn write_line(out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out, "{}", text)?;
    out.flush()?;
    Ok(())
}

pub fn calculate_grades(
    state: &AppState,
    args: &StudentArgs,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let student = student_from_args(args)?;
    let report = state.grade_report_use_case.execute(&student)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Internal(format!("Failed to serialize report: {}", e)))?;
        return write_line(out, &rendered);
    }

    write!(out, "{}", report)?;
    out.flush()?;
    Ok(())
}

/// Validates the form and resolves the API key up front, then runs the request
/// in the background while the waiting message is shown.
pub async fn generate_feedback(
    state: &AppState,
    args: &FeedbackArgs,
    out: &mut impl Write,
) -> Result<FeedbackOutcome> {
    let student = student_from_args(&args.student)?;
    FeedbackUseCase::validate(&student)?;

    let (source, api_key) = state
        .config_service
        .resolve_api_key(args.api_key.as_deref(), &state.config.gemini)
        .ok_or_else(|| AppError::ConfigError(MISSING_API_KEY_MESSAGE.to_string()))?;
    info!(source = %source, model = %state.config.gemini.model, "Using Gemini API key");

    let config = state.config.gemini.clone().with_api_key(api_key);

    write_line(out, WAITING_MESSAGE)?;
    let rx = spawn_feedback(state.feedback_use_case.clone(), config, student);
    let outcome = await_feedback(rx).await;

    match (&outcome, args.json) {
        (FeedbackOutcome::Ready(report), true) => {
            let rendered = serde_json::to_string_pretty(report)
                .map_err(|e| AppError::Internal(format!("Failed to serialize report: {}", e)))?;
            write_line(out, &rendered)?;
        }
        _ => write_line(out, &outcome.display_text())?,
    }

    Ok(outcome)
}

pub fn manage_api_key(state: &AppState, command: &KeyCommand, out: &mut impl Write) -> Result<()> {
    match command {
        KeyCommand::Set { key } => {
            state.config_service.save_api_key(key)?;
            write_line(out, "API key set.")
        }
        KeyCommand::Clear => {
            state.config_service.delete_api_key()?;
            write_line(out, "API key cleared.")
        }
        KeyCommand::Status => {
            match state
                .config_service
                .resolve_api_key(None, &state.config.gemini)
            {
                Some((source, _)) => write_line(out, &format!("API key available from {}.", source)),
                None => write_line(out, "No API key configured."),
            }
        }
    }
}
