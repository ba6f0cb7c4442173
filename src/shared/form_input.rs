use crate::domain::error::{AppError, Result};
use crate::domain::student::Student;

/// Splits a comma-separated field, trimming items and dropping blank ones.
pub fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_marks(items: &[String]) -> Result<Vec<f64>> {
    items
        .iter()
        .map(|item| {
            item.parse::<f64>()
                .map_err(|e| AppError::ParseError(format!("Invalid mark '{}': {}", item, e)))
        })
        .collect()
}

/// Builds a [`Student`] from the three raw form fields.
pub fn parse_student(name: &str, subjects: &str, marks: &str) -> Result<Student> {
    let subjects = split_csv(subjects);
    let marks = parse_marks(&split_csv(marks))?;
    Ok(Student::new(name.trim(), subjects, marks))
}
