pub mod feedback;
pub mod grade_report;
