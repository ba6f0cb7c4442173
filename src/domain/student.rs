use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_subject_marks"))]
pub struct Student {
    pub name: String,
    pub subjects: Vec<String>,
    pub marks: Vec<f64>,
}

impl Student {
    pub fn new(name: impl Into<String>, subjects: Vec<String>, marks: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            subjects,
            marks,
        }
    }

    pub fn total(&self) -> f64 {
        self.marks.iter().sum()
    }

    pub fn average(&self) -> f64 {
        if self.marks.is_empty() {
            return 0.0;
        }
        self.total() / self.marks.len() as f64
    }

    /// Pairs each subject with its mark, in input order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.subjects
            .iter()
            .map(String::as_str)
            .zip(self.marks.iter().copied())
    }
}

fn validate_subject_marks(student: &Student) -> Result<(), ValidationError> {
    if student.subjects.len() != student.marks.len() {
        let mut err = ValidationError::new("subject_marks_mismatch");
        err.message = Some("Subjects and marks count must match.".into());
        return Err(err);
    }
    Ok(())
}

/// Renders a mark for display: whole numbers keep one decimal (`85.0`), other
/// values use their shortest form. Magnitudes of 1e7 and above, or tiny
/// fractions, print in plain decimal notation (`10000000`, `0.0001`), never in
/// exponent form such as `1.0E7`.
pub fn format_mark(mark: f64) -> String {
    if mark.is_finite() && mark.fract() == 0.0 && mark.abs() < 1e7 {
        format!("{:.1}", mark)
    } else {
        format!("{}", mark)
    }
}
