mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use fiado::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
