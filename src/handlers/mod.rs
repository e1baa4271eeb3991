// handlers/mod.rs - Request dispatcher
//
// Everything goes through `/` and is routed by query string:
//   /?page=<name>                 render a page (default: landing)
//   /?action=<name>[&id=<id>]     run an action, then redirect with a flash toast
//
// Public handlers (pages, login/signup/logout) need no user. Protected handlers
// (ticket mutations) require a user in the session.

pub mod protected;
pub mod public;

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::auth::Credentials;
use crate::error::ApiError;
use crate::middleware::CurrentSession;
use crate::session::Toast;
use crate::state::AppState;
use crate::store::{FieldErrors, TicketInput};

#[derive(Debug, Default, Deserialize)]
pub struct RequestQuery {
    pub page: Option<String>,
    pub action: Option<String>,
    pub id: Option<String>,
}

/// Union of every field any action reads from the form body.
#[derive(Debug, Default, Deserialize)]
pub struct ActionForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl ActionForm {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn ticket_input(&self) -> TicketInput {
        TicketInput {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            priority: self.priority.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    Signup,
    Logout,
    CreateTicket,
    UpdateTicket,
    DeleteTicket,
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Action::Login),
            "signup" => Ok(Action::Signup),
            "logout" => Ok(Action::Logout),
            "create_ticket" => Ok(Action::CreateTicket),
            "update_ticket" => Ok(Action::UpdateTicket),
            "delete_ticket" => Ok(Action::DeleteTicket),
            _ => Err(()),
        }
    }
}

/// GET|POST / - runs the requested action, otherwise renders the requested page.
///
/// Unknown action names are ignored.
pub async fn index(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<RequestQuery>,
    form: Option<Form<ActionForm>>,
) -> Result<Response, ApiError> {
    let form = form.map(|Form(f)| f).unwrap_or_default();

    let action = query.action.as_deref().and_then(|a| a.parse::<Action>().ok());
    let Some(action) = action else {
        return public::pages::render(&state, session, query.page.as_deref()).await;
    };

    tracing::debug!("Dispatching action {:?}", action);
    match action {
        Action::Login => Ok(public::auth::login(&state, session, &form).await),
        Action::Signup => Ok(public::auth::signup(&state, session, &form).await),
        Action::Logout => Ok(public::auth::logout(&state, session).await),
        Action::CreateTicket => protected::tickets::create(&state, session, &form).await,
        Action::UpdateTicket => protected::tickets::update(&state, session, &form).await,
        Action::DeleteTicket => {
            let id = query.id.unwrap_or_default();
            protected::tickets::delete(&state, session, &id).await
        }
    }
}

/// Stores the flash toast (and any field errors) in the session, then redirects.
///
/// Every action ends here so a browser refresh never re-submits it.
pub(crate) async fn flash_redirect(
    state: &AppState,
    mut session: CurrentSession,
    toast: Toast,
    errors: FieldErrors,
    page: &str,
) -> Response {
    session.data.toast = Some(toast);
    session.data.errors = errors;
    session.commit(state).await;
    Redirect::to(&format!("/?page={}", page)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!("create_ticket".parse::<Action>(), Ok(Action::CreateTicket));
        assert_eq!("delete_ticket".parse::<Action>(), Ok(Action::DeleteTicket));
        assert!("drop_table".parse::<Action>().is_err());
    }

    #[test]
    fn test_form_keeps_status_omission_distinct_from_empty() {
        let omitted: ActionForm = serde_json::from_value(serde_json::json!({"title": "x"})).unwrap();
        assert!(omitted.ticket_input().status.is_none());

        let empty: ActionForm =
            serde_json::from_value(serde_json::json!({"title": "x", "status": ""})).unwrap();
        assert_eq!(empty.ticket_input().status.as_deref(), Some(""));
    }
}
