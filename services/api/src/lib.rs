mod cities;
mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use transport_token::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
