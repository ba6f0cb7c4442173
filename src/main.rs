use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    grade_tracker_lib::run().await
}
