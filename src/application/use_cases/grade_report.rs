use crate::domain::error::{AppError, Result};
use crate::domain::feedback::GradeReport;
use crate::domain::student::Student;
use tracing::debug;
use validator::Validate;

pub struct GradeReportUseCase;

impl GradeReportUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, student: &Student) -> Result<GradeReport> {
        student.validate().map_err(|_| {
            AppError::ValidationError("Subjects and marks count must match.".to_string())
        })?;

        let report = GradeReport::from_student(student);
        debug!(
            subjects = report.details.len(),
            total = report.total,
            average = report.average,
            "Calculated grade report"
        );
        Ok(report)
    }
}

impl Default for GradeReportUseCase {
    fn default() -> Self {
        Self::new()
    }
}
