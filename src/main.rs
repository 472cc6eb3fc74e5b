mod cli;
mod error;
mod generate;
mod hooks;
mod install;
mod pyproject;
mod settings;

use clap::Parser;
use cli::{App, Cli};
use colored::*;
use error::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    info!("Starting pre-commit configuration generator...");

    let app = App::new();
    if let Err(e) = app.run(cli).await {
        error!("Command execution failed: {:?}", e);
        println!("{} {}", "Error:".red(), e.to_string().red());
        return Err(e);
    }

    Ok(())
}
