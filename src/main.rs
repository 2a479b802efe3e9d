use std::error::Error;

mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is tolerated.
    let dotenv = dotenvy::dotenv();

    telemetry::init()?;

    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    api::start().await?;

    Ok(())
}
