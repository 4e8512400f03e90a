mod cli;
mod infra;
mod script;
mod session;

use devjobs::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
