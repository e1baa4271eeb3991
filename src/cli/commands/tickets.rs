use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_field_errors, output_stats, output_success, output_tickets};
use crate::cli::OutputFormat;
use crate::store::{StoreError, TicketInput, TicketStore};

#[derive(Subcommand)]
pub enum TicketCommands {
    #[command(about = "List every ticket in display order")]
    List,

    #[command(about = "Show ticket counts per status")]
    Stats,

    #[command(about = "Create a ticket")]
    Create {
        #[arg(help = "Ticket title")]
        title: String,
        #[arg(long, short, default_value = "", help = "Ticket description")]
        description: String,
        #[arg(long, short, help = "open, in_progress or closed (default: open)")]
        status: Option<String>,
        #[arg(long, short, help = "Free-form priority tag (default: medium)")]
        priority: Option<String>,
    },

    #[command(about = "Overwrite the editable fields of a ticket")]
    Update {
        #[arg(help = "Ticket ID")]
        id: String,
        #[arg(help = "New title")]
        title: String,
        #[arg(long, short, default_value = "", help = "New description")]
        description: String,
        #[arg(long, short, help = "open, in_progress or closed (default: open)")]
        status: Option<String>,
        #[arg(long, short, help = "Free-form priority tag (default: medium)")]
        priority: Option<String>,
    },

    #[command(about = "Delete a ticket (succeeds even if the ID is unknown)")]
    Delete {
        #[arg(help = "Ticket ID")]
        id: String,
    },
}

pub async fn handle(cmd: TicketCommands, store: &TicketStore, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TicketCommands::List => {
            let tickets = store.list().await?;
            output_tickets(&output_format, &tickets)
        }
        TicketCommands::Stats => {
            let stats = store.stats().await?;
            output_stats(&output_format, &stats)
        }
        TicketCommands::Create { title, description, status, priority } => {
            let input = TicketInput { title, description, status, priority };
            match store.create(&input).await {
                Ok(ticket) => output_success(
                    &output_format,
                    &format!("Created ticket {}", ticket.id),
                    Some(json!(ticket)),
                ),
                Err(StoreError::Validation(errors)) => {
                    output_field_errors(&output_format, &errors)?;
                    anyhow::bail!("ticket not created")
                }
                Err(e) => Err(e.into()),
            }
        }
        TicketCommands::Update { id, title, description, status, priority } => {
            let input = TicketInput { title, description, status, priority };
            match store.update(&id, &input).await {
                Ok(Some(ticket)) => output_success(
                    &output_format,
                    &format!("Updated ticket {}", ticket.id),
                    Some(json!(ticket)),
                ),
                Ok(None) => output_success(&output_format, &format!("No ticket with ID {}; nothing changed", id), None),
                Err(StoreError::Validation(errors)) => {
                    output_field_errors(&output_format, &errors)?;
                    anyhow::bail!("ticket not updated")
                }
                Err(e) => Err(e.into()),
            }
        }
        TicketCommands::Delete { id } => {
            let removed = store.delete(&id).await?;
            output_success(
                &output_format,
                &format!("Deleted ticket {}", id),
                Some(json!({ "removed": removed })),
            )
        }
    }
}
