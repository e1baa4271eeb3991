// handlers/public/auth/mod.rs - login, signup and logout actions
//
// Credentials are checked for shape only (see `Credentials::validate`); a
// well-formed pair always signs in.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::handlers::{flash_redirect, ActionForm};
use crate::middleware::{session_cookie, CurrentSession};
use crate::session::{SessionData, Toast};
use crate::state::AppState;
use crate::store::FieldErrors;

/// ?action=login
pub async fn login(state: &AppState, session: CurrentSession, form: &ActionForm) -> Response {
    sign_in(state, session, form, "login", "Logged in successfully!").await
}

/// ?action=signup - identical to login apart from the messages.
pub async fn signup(state: &AppState, session: CurrentSession, form: &ActionForm) -> Response {
    sign_in(state, session, form, "signup", "Signed up successfully!").await
}

async fn sign_in(
    state: &AppState,
    mut session: CurrentSession,
    form: &ActionForm,
    retry_page: &str,
    success: &str,
) -> Response {
    let min_length = state.config.security.password_min_length;
    match form.credentials().validate(min_length) {
        Ok(user) => {
            tracing::info!("User {} signed in via {}", user.email, retry_page);
            session.data.user = Some(user);
            flash_redirect(state, session, Toast::success(success), FieldErrors::new(), "dashboard").await
        }
        Err(errors) => {
            tracing::debug!("Rejected {} with {} field error(s)", retry_page, errors.len());
            flash_redirect(
                state,
                session,
                Toast::error("Please fix the errors"),
                errors,
                retry_page,
            )
            .await
        }
    }
}

/// ?action=logout - drops the whole session and starts a new one holding only
/// the farewell toast.
pub async fn logout(state: &AppState, session: CurrentSession) -> Response {
    if let Some(user) = &session.data.user {
        tracing::info!("User {} logged out", user.email);
    }
    state.sessions.destroy(&session.token).await;

    let token = state
        .sessions
        .create(SessionData {
            toast: Some(Toast::success("Logged out successfully")),
            ..Default::default()
        })
        .await;

    let cookie = session_cookie(&state.config, token);
    (
        CookieJar::new().add(cookie),
        Redirect::to("/?page=landing"),
    )
        .into_response()
}
