//! Page rendering seam.
//!
//! Handlers never build markup themselves: they assemble a [`ViewContext`] and
//! ask a [`ViewRenderer`] for the named page. The built-in implementation is
//! [`HtmlRenderer`]; anything else (a template engine, a JSON dump for tests)
//! can be plugged into `AppState` instead.

mod html;

use serde::Serialize;
use thiserror::Error;

use crate::auth::User;
use crate::session::Toast;
use crate::store::{FieldErrors, Stats, Ticket};

pub use html::HtmlRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no view named '{0}'")]
    NotFound(String),
}

/// Everything a page may draw from.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewContext {
    pub page: String,
    pub tickets: Vec<Ticket>,
    pub stats: Stats,
    pub toast: Option<Toast>,
    pub user: Option<User>,
    pub errors: FieldErrors,
}

pub trait ViewRenderer: Send + Sync {
    fn render(&self, page: &str, ctx: &ViewContext) -> Result<String, RenderError>;
}
