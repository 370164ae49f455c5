mod cli;
mod infra;
mod journey;
mod report;
mod routes;
mod server;

use ekoliv::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
