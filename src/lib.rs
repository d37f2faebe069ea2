pub mod config;
pub mod error;
pub mod profiles;
pub mod telemetry;

mod cli;
mod routes;
mod server;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
