mod cli;
mod infra;
mod routes;
mod server;

use gummy_mummy::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
