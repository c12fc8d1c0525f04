mod assess;
mod cli;
mod infra;
mod notes;
mod routes;
mod server;

use health_profiler::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
