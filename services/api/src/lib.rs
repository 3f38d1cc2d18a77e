mod cli;
mod infra;
mod report;
mod routes;
mod server;

use escort_compliance::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
