pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront CLI - admin front end for the storefront API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Remote server and session configuration")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Product catalog administration")]
    Products {
        #[command(subcommand)]
        cmd: commands::products::ProductCommands,
    },

    #[command(about = "Profile of the logged-in client")]
    Profile {
        #[command(subcommand)]
        cmd: commands::profile::ProfileCommands,
    },

    #[command(about = "Dashboard widgets and the discount wheel")]
    Dashboard {
        #[command(subcommand)]
        cmd: commands::dashboard::DashboardCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Server { cmd } => commands::server::handle(cmd, output_format).await,
        Commands::Products { cmd } => commands::products::handle(cmd, output_format).await,
        Commands::Profile { cmd } => commands::profile::handle(cmd, output_format).await,
        Commands::Dashboard { cmd } => commands::dashboard::handle(cmd, output_format).await,
    }
}
