use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::store::TicketStore;
use crate::views::{HtmlRenderer, ViewRenderer};

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<TicketStore>,
    pub sessions: SessionStore,
    pub renderer: Arc<dyn ViewRenderer>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = TicketStore::new(config.storage.tickets_file.clone());
        let sessions = SessionStore::new(Duration::from_secs(config.session.idle_ttl_secs));
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            sessions,
            renderer: Arc::new(HtmlRenderer),
        }
    }

    pub fn with_renderer(mut self, renderer: impl ViewRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }
}
