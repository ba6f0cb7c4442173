use super::student::{format_mark, Student};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectMark {
    pub subject: String,
    pub mark: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeReport {
    pub name: String,
    pub details: Vec<SubjectMark>,
    pub total: f64,
    pub average: f64,
}

impl GradeReport {
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            details: student
                .entries()
                .map(|(subject, mark)| SubjectMark {
                    subject: subject.to_string(),
                    mark,
                })
                .collect(),
            total: student.total(),
            average: student.average(),
        }
    }
}

impl fmt::Display for GradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Details:")?;
        for entry in &self.details {
            writeln!(f, " - {}: {}", entry.subject, format_mark(entry.mark))?;
        }
        write!(f, "\nTotal: {:.2}\nAverage: {:.2}\n", self.total, self.average)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub student_name: String,
    pub feedback: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl FeedbackReport {
    pub fn new(student_name: String, feedback: String) -> Self {
        Self {
            student_name,
            feedback,
            generated_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_report_text() {
        let student = Student::new(
            "Asha",
            vec!["Math".to_string(), "Art".to_string()],
            vec![90.0, 72.5],
        );
        let report = GradeReport::from_student(&student);

        assert_eq!(report.total, 162.5);
        assert_eq!(report.average, 81.25);
        assert_eq!(
            report.to_string(),
            "Details:\n - Math: 90.0\n - Art: 72.5\n\nTotal: 162.50\nAverage: 81.25\n"
        );
    }

    #[test]
    fn test_grade_report_serializes_details() {
        let student = Student::new("Asha", vec!["Math".to_string()], vec![90.0]);
        let value = serde_json::to_value(GradeReport::from_student(&student)).unwrap();
        assert_eq!(value["details"][0]["subject"], "Math");
        assert_eq!(value["average"], 90.0);
    }
}
