mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use elo_nr01::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
