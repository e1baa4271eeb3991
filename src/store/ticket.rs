use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Field name → user-facing message, as redisplayed next to form inputs. Sorted by field.
pub type FieldErrors = BTreeMap<String, String>;

pub const DEFAULT_PRIORITY: &str = "medium";

/// Ticket lifecycle state. Any state may move to any other; there is no workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Closed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Open, Status::InProgress, Status::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Closed => "Closed",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Open
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Status::Open),
            "in_progress" => Ok(Status::InProgress),
            "closed" => Ok(Status::Closed),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

/// Raw, unvalidated ticket fields as submitted by a form or the CLI.
///
/// `status` and `priority` are optional: omission means "use the default",
/// which is different from submitting an empty or unknown value.
#[derive(Debug, Clone, Default)]
pub struct TicketInput {
    pub title: String,
    pub description: String,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Ticket fields that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketFields {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: String,
}

impl TicketInput {
    /// Checks every field and collects all failures rather than stopping at the first.
    pub fn validate(&self) -> Result<TicketFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert("title".to_string(), "Title is required".to_string());
        }

        let status = match self.status.as_deref() {
            None => Some(Status::default()),
            Some(raw) => raw.parse::<Status>().ok(),
        };
        if status.is_none() {
            errors.insert("status".to_string(), "Invalid status".to_string());
        }

        match status {
            Some(status) if errors.is_empty() => Ok(TicketFields {
                title: title.to_string(),
                description: self.description.trim().to_string(),
                status,
                priority: self
                    .priority
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            }),
            _ => Err(errors),
        }
    }
}

/// Counts derived from the current collection. Never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
}

impl Stats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        tickets.iter().fold(Stats::default(), |mut stats, ticket| {
            stats.total += 1;
            match ticket.status {
                Status::Open => stats.open += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Closed => stats.closed += 1,
            }
            stats
        })
    }
}
