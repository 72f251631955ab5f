pub mod commands;
pub mod config;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "parish")]
#[command(about = "Parish CLI - Command-line interface for the church administration API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check server health status from the API /health endpoint")]
    Health,

    #[command(about = "Dues processing operations")]
    Dues {
        #[command(subcommand)]
        cmd: commands::dues::DuesCommands,
    },

    #[command(about = "User management")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Health => commands::health::handle().await,
        Commands::Dues { cmd } => commands::dues::handle(cmd).await,
        Commands::User { cmd } => commands::user::handle(cmd).await,
    }
}
