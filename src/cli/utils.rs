use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::store::{FieldErrors, Stats, Ticket};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output field validation errors in the appropriate format
pub fn output_field_errors(output_format: &OutputFormat, errors: &FieldErrors) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": false,
                    "error": "Please fix the errors",
                    "field_errors": errors
                }))?
            );
        }
        OutputFormat::Text => {
            eprintln!("Error: Please fix the errors");
            let mut fields: Vec<_> = errors.iter().collect();
            fields.sort();
            for (field, message) in fields {
                eprintln!("  {}: {}", field, message);
            }
        }
    }
    Ok(())
}

pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output the ticket collection in the appropriate format
pub fn output_tickets(output_format: &OutputFormat, tickets: &[Ticket]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(&tickets),
        OutputFormat::Text => {
            if tickets.is_empty() {
                println!("No tickets found");
                return Ok(());
            }

            println!("{:<36}  {:<11}  {:<8}  {:<25}  TITLE", "ID", "STATUS", "PRIORITY", "CREATED");
            for ticket in tickets {
                println!(
                    "{:<36}  {:<11}  {:<8}  {:<25}  {}",
                    ticket.id,
                    ticket.status,
                    ticket.priority,
                    ticket.created_at.to_rfc3339(),
                    ticket.title
                );
            }
            Ok(())
        }
    }
}

pub fn output_stats(output_format: &OutputFormat, stats: &Stats) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(stats),
        OutputFormat::Text => {
            println!("Total:       {}", stats.total);
            println!("Open:        {}", stats.open);
            println!("In progress: {}", stats.in_progress);
            println!("Closed:      {}", stats.closed);
            Ok(())
        }
    }
}
