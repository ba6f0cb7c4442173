pub mod form_input;
pub mod json_text;
