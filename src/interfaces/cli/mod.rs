pub mod commands;
pub mod state;
pub mod worker;

use crate::domain::error::Result;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

pub use state::AppState;
pub use worker::FeedbackOutcome;

#[derive(Debug, Parser)]
#[command(
    name = "grade-tracker",
    version,
    about = "Record a student's marks, compute totals and ask Gemini for feedback"
)]
pub struct Cli {
    /// TOML config file (defaults to ./grade-tracker.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show per-subject marks, total and average
    Calculate {
        #[command(flatten)]
        student: StudentArgs,
        #[arg(long)]
        json: bool,
    },
    /// Ask Gemini for written feedback on the student's marks
    Feedback(FeedbackArgs),
    /// Manage the stored Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyCommand,
    },
}

#[derive(Debug, Clone, Args)]
pub struct StudentArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    /// Comma-separated subject names
    #[arg(long, default_value = "")]
    pub subjects: String,
    /// Comma-separated marks, one per subject
    #[arg(long, default_value = "")]
    pub marks: String,
}

#[derive(Debug, Clone, Args)]
pub struct FeedbackArgs {
    #[command(flatten)]
    pub student: StudentArgs,
    /// Overrides every other API key source for this run
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum KeyCommand {
    Set { key: String },
    Clear,
    Status,
}

/// Runs one command. `Ok(false)` means the command finished but reported a
/// failure as display text.
pub async fn dispatch(state: &AppState, command: &Command, out: &mut impl Write) -> Result<bool> {
    match command {
        Command::Calculate { student, json } => {
            commands::calculate_grades(state, student, *json, out)?;
            Ok(true)
        }
        Command::Feedback(args) => {
            let outcome = commands::generate_feedback(state, args, out).await?;
            Ok(matches!(outcome, FeedbackOutcome::Ready(_)))
        }
        Command::Key { action } => {
            commands::manage_api_key(state, action, out)?;
            Ok(true)
        }
    }
}
