use crate::domain::student::{format_mark, Student};
use std::fmt::Write;

const MENTOR_INSTRUCTIONS: &str = "You are a helpful academic mentor. Analyze the student's performance and write concise feedback (120-180 words). Include:
- Top 2 strengths and the subjects they relate to
- 2-3 specific, actionable suggestions for improvement
- A short motivational closing line
";

const CLOSING_INSTRUCTIONS: &str = "Keep the tone supportive and professional. Avoid markdown.";

/// `Math: 90.0, Art: 72.5`
fn build_marks_table(student: &Student) -> String {
    student
        .entries()
        .map(|(subject, mark)| format!("{}: {}", subject, format_mark(mark)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn build_feedback_prompt(student: &Student) -> String {
    let mut prompt = String::from(MENTOR_INSTRUCTIONS);

    prompt.push('\n');
    prompt.push_str("Student:\n");
    let _ = writeln!(prompt, "- Name: {}", student.name);
    let _ = writeln!(prompt, "- Subjects & Marks: {}", build_marks_table(student));
    let _ = writeln!(prompt, "- Average: {:.2}", student.average());
    prompt.push('\n');
    prompt.push_str(CLOSING_INSTRUCTIONS);

    prompt
}
