use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod handlers;
mod router;
mod schemas;
#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

use cli::Cli;

/// Main entry point for the Take-a-Hike accounts service.
#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads environment fallbacks
    dotenvy::dotenv().ok();

    model::init_tracing();

    let cli = Cli::parse();
    cli.run().await?;

    Ok(())
}
