//! JSON-document ticket store.
//!
//! The whole collection lives in one pretty-printed JSON array on disk. Every
//! operation loads the full document, works on it in memory and rewrites it in
//! full; nothing is cached between calls, so the file stays the only source of
//! truth. A single async mutex serialises the read-modify-write cycle so two
//! concurrent mutations cannot lose each other's writes.

pub mod ticket;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

pub use ticket::{FieldErrors, Stats, Status, Ticket, TicketFields, TicketInput};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ticket document {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode tickets: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub struct TicketStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TicketStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All tickets in insertion order. Creates an empty document on first access.
    pub async fn list(&self) -> Result<Vec<Ticket>, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    pub async fn stats(&self) -> Result<Stats, StoreError> {
        let tickets = self.list().await?;
        Ok(Stats::from_tickets(&tickets))
    }

    pub async fn create(&self, input: &TicketInput) -> Result<Ticket, StoreError> {
        let fields = input.validate().map_err(StoreError::Validation)?;

        let _guard = self.lock.lock().await;
        let mut tickets = self.load().await?;

        let ticket = Ticket {
            id: Uuid::new_v4().to_string(),
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority,
            created_at: Utc::now(),
        };
        tickets.push(ticket.clone());
        self.persist(&tickets).await?;

        tracing::info!("Created ticket {} ({})", ticket.id, ticket.status);
        Ok(ticket)
    }

    /// Overwrites the editable fields of the first ticket with `id`.
    ///
    /// Validation runs whether or not the ticket exists. An unknown id is not an
    /// error: the collection is rewritten unchanged and `None` is returned.
    pub async fn update(&self, id: &str, input: &TicketInput) -> Result<Option<Ticket>, StoreError> {
        let fields = input.validate().map_err(StoreError::Validation)?;

        let _guard = self.lock.lock().await;
        let mut tickets = self.load().await?;

        let updated = tickets.iter_mut().find(|t| t.id == id).map(|ticket| {
            ticket.title = fields.title;
            ticket.description = fields.description;
            ticket.status = fields.status;
            ticket.priority = fields.priority;
            ticket.clone()
        });
        self.persist(&tickets).await?;

        match &updated {
            Some(ticket) => tracing::info!("Updated ticket {} ({})", ticket.id, ticket.status),
            None => tracing::debug!("Update for unknown ticket {} left collection unchanged", id),
        }
        Ok(updated)
    }

    /// Removes every ticket with `id` and returns how many were dropped (usually 0 or 1).
    pub async fn delete(&self, id: &str) -> Result<usize, StoreError> {
        let _guard = self.lock.lock().await;
        let mut tickets = self.load().await?;

        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        let removed = before - tickets.len();
        self.persist(&tickets).await?;

        tracing::info!("Deleted ticket {} (removed {})", id, removed);
        Ok(removed)
    }

    /// Callers must hold `self.lock`.
    async fn load(&self) -> Result<Vec<Ticket>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("Initializing empty ticket document at {}", self.path.display());
                self.persist(&[]).await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes to a sibling temp file and renames it over the document.
    /// Callers must hold `self.lock`.
    async fn persist(&self, tickets: &[Ticket]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let body = serde_json::to_vec_pretty(tickets)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))
    }
}
