//! CLI interface for Finder

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "finder")]
#[command(version = "1.0.0")]
#[command(about = "Find and rate local service professionals", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new finder.toml configuration file
    Init,

    /// Sign in and persist the session
    Login {
        /// Account email (prompted for when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Sign out and discard the persisted session
    Logout,

    /// Create a new account
    Register,

    /// Show the currently signed-in user
    Whoami,

    /// Browse service categories
    Categories {
        /// Page to fetch (zero-based)
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Page size (defaults to the configured browse page size)
        #[arg(short, long)]
        size: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Browse workers within a category
    Workers {
        /// Category name to search in
        category: String,

        /// Page to fetch (zero-based)
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Page size (defaults to the configured browse page size)
        #[arg(short, long)]
        size: Option<u32>,

        /// Fetch review aggregates for each worker
        #[arg(long)]
        stats: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Rate a worker
    Rate {
        /// Worker to rate
        worker_id: i64,

        /// Rating, 1 through 5 stars
        #[arg(short, long)]
        rating: u8,

        /// Optional review comment
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Register yourself as a worker
    Join,

    /// Moderate worker registrations
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Approve a pending worker registration
    Accept {
        /// Worker to approve
        worker_id: i64,
    },

    /// Remove a worker from the directory
    Delete {
        /// Worker to remove
        worker_id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
