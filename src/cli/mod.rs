pub mod commands;
pub mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::store::TicketStore;

#[derive(Parser)]
#[command(name = "helpdesk-cli")]
#[command(about = "Helpdesk CLI - inspect and edit the ticket document directly")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "HELPDESK_TICKETS_FILE",
        help = "Path to the ticket document (defaults to the server's configured path)"
    )]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List, create, update and delete tickets")]
    Tickets {
        #[command(subcommand)]
        cmd: commands::tickets::TicketCommands,
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
    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| crate::config::config().storage.tickets_file.clone());
    let store = TicketStore::new(path);

    match cli.command {
        Commands::Tickets { cmd } => commands::tickets::handle(cmd, &store, output_format).await,
    }
}
