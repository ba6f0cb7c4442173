mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use app::run;
pub use domain::error::{AppError, Result};
pub use shared::json_text::{encode_request, escape_json_string, extract_first_text};
