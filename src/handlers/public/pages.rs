use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::ApiError;
use crate::middleware::{require_user, CurrentSession};
use crate::session::Toast;
use crate::state::AppState;
use crate::store::Stats;
use crate::views::{RenderError, ViewContext};

pub const DEFAULT_PAGE: &str = "landing";

/// Pages that need a signed-in user.
pub const PROTECTED_PAGES: [&str; 2] = ["dashboard", "tickets"];

/// ?page=<name> - renders a page, consuming the session's flash toast and field errors.
///
/// Unknown page names fall back to the landing page with a 404 and an error toast.
pub async fn render(
    state: &AppState,
    mut session: CurrentSession,
    page: Option<&str>,
) -> Result<Response, ApiError> {
    let page = page.unwrap_or(DEFAULT_PAGE);

    if PROTECTED_PAGES.contains(&page) {
        if let Err(redirect) = require_user(state, &mut session).await {
            return Ok(redirect);
        }
    }

    let tickets = state.store.list().await?;
    let stats = Stats::from_tickets(&tickets);

    let (toast, errors) = session.data.take_flash();
    let user = session.data.user.clone();
    session.commit(state).await;

    let ctx = ViewContext {
        page: page.to_string(),
        tickets,
        stats,
        toast,
        user: user.clone(),
        errors,
    };

    match state.renderer.render(page, &ctx) {
        Ok(html) => Ok(Html(html).into_response()),
        Err(RenderError::NotFound(missing)) => {
            tracing::warn!("Page not found: {}", missing);
            let fallback = ViewContext {
                page: DEFAULT_PAGE.to_string(),
                toast: Some(Toast::error("Page not found")),
                user,
                ..Default::default()
            };
            let html = state.renderer.render(DEFAULT_PAGE, &fallback)?;
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
    }
}
