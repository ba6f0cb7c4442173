pub mod use_cases;

pub use use_cases::feedback::FeedbackUseCase;
pub use use_cases::grade_report::GradeReportUseCase;
