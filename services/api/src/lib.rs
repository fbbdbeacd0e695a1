mod board;
mod cli;
mod infra;
mod routes;
mod server;

use hire_desk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
