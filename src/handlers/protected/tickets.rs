use axum::response::Response;

use crate::error::ApiError;
use crate::handlers::{flash_redirect, ActionForm};
use crate::middleware::{require_user, CurrentSession};
use crate::session::Toast;
use crate::state::AppState;
use crate::store::{FieldErrors, StoreError};

const TICKETS_PAGE: &str = "tickets";

/// ?action=create_ticket
pub async fn create(
    state: &AppState,
    mut session: CurrentSession,
    form: &ActionForm,
) -> Result<Response, ApiError> {
    if let Err(redirect) = require_user(state, &mut session).await {
        return Ok(redirect);
    }

    let result = state.store.create(&form.ticket_input()).await.map(|_| ());
    finish(state, session, result, "Ticket created successfully").await
}

/// ?action=update_ticket - an unknown id still counts as success.
pub async fn update(
    state: &AppState,
    mut session: CurrentSession,
    form: &ActionForm,
) -> Result<Response, ApiError> {
    if let Err(redirect) = require_user(state, &mut session).await {
        return Ok(redirect);
    }

    let result = state
        .store
        .update(&form.id, &form.ticket_input())
        .await
        .map(|_| ());
    finish(state, session, result, "Ticket updated successfully").await
}

/// ?action=delete_ticket&id=<id> - always succeeds, even if nothing matched.
pub async fn delete(
    state: &AppState,
    mut session: CurrentSession,
    id: &str,
) -> Result<Response, ApiError> {
    if let Err(redirect) = require_user(state, &mut session).await {
        return Ok(redirect);
    }

    let result = state.store.delete(id).await.map(|_| ());
    finish(state, session, result, "Ticket deleted successfully").await
}

/// Validation failures become an error toast plus field errors; anything else
/// from the store aborts the request.
async fn finish(
    state: &AppState,
    session: CurrentSession,
    result: Result<(), StoreError>,
    success: &str,
) -> Result<Response, ApiError> {
    match result {
        Ok(()) => Ok(flash_redirect(state, session, Toast::success(success), FieldErrors::new(), TICKETS_PAGE).await),
        Err(StoreError::Validation(errors)) => Ok(flash_redirect(
            state,
            session,
            Toast::error("Please fix the errors"),
            errors,
            TICKETS_PAGE,
        )
        .await),
        Err(e) => Err(e.into()),
    }
}
