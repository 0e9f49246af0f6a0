use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod auth;
mod cli;
mod config;
mod error;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Login { email } => cli::commands::login(email).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Register => cli::commands::register().await,
        Commands::Whoami => cli::commands::whoami().await,
        Commands::Categories { page, size, format } => {
            cli::commands::categories(page, size, format).await
        }
        Commands::Workers {
            category,
            page,
            size,
            stats,
            format,
        } => cli::commands::workers(&category, page, size, stats, format).await,
        Commands::Rate {
            worker_id,
            rating,
            comment,
        } => cli::commands::rate(worker_id, rating, comment).await,
        Commands::Join => cli::commands::join().await,
        Commands::Worker { action } => cli::commands::worker(action).await,
    }
}
