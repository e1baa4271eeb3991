//! Server-side session bag keyed by an opaque cookie token.
//!
//! A session carries the signed-in user plus two one-shot slots (the flash
//! toast and the form field errors) that are emptied by whichever page renders
//! next. Entries idle longer than the configured TTL are dropped on access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::User;
use crate::store::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

/// One-shot notification shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionData {
    pub user: Option<User>,
    pub toast: Option<Toast>,
    pub errors: FieldErrors,
}

impl SessionData {
    /// Takes the toast and field errors, leaving both slots empty.
    pub fn take_flash(&mut self) -> (Option<Toast>, FieldErrors) {
        (self.toast.take(), std::mem::take(&mut self.errors))
    }
}

#[derive(Debug)]
struct Entry {
    data: SessionData,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Returns the live session for `token`, or `None` if unknown or expired.
    pub async fn load(&self, token: &str) -> Option<SessionData> {
        let mut entries = self.entries.write().await;
        let expired = match entries.get_mut(token) {
            Some(entry) if entry.last_seen.elapsed() <= self.idle_ttl => {
                entry.last_seen = Instant::now();
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(token);
            tracing::debug!("Session expired after {:?} idle", self.idle_ttl);
        }
        None
    }

    /// Registers a fresh session and returns its token.
    pub async fn create(&self, data: SessionData) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.save(&token, data).await;
        token
    }

    pub async fn save(&self, token: &str, data: SessionData) {
        let mut entries = self.entries.write().await;
        entries.insert(
            token.to_string(),
            Entry {
                data,
                last_seen: Instant::now(),
            },
        );
    }

    pub async fn destroy(&self, token: &str) {
        self.entries.write().await.remove(token);
    }

    /// Drops every expired entry. Returns how many were removed.
    pub async fn sweep(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        let ttl = self.idle_ttl;
        entries.retain(|_, entry| entry.last_seen.elapsed() <= ttl);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
