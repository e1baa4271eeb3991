use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::auth::User;
use crate::config::AppConfig;
use crate::session::{SessionData, Toast};
use crate::state::AppState;

/// Session attached to the current request by [`session_middleware`].
///
/// Handlers own the snapshot; changes only stick once they call
/// [`CurrentSession::commit`].
#[derive(Clone, Debug)]
pub struct CurrentSession {
    pub token: String,
    pub data: SessionData,
}

impl CurrentSession {
    pub async fn commit(self, state: &AppState) {
        state.sessions.save(&self.token, self.data).await;
    }
}

/// Loads (or starts) the cookie-keyed session and injects it into request extensions.
///
/// A freshly started session has its cookie set on the way out, unless the
/// handler already issued one itself (logout does).
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.session.cookie_name.clone();

    let existing = match jar.get(&cookie_name) {
        Some(cookie) => {
            let token = cookie.value().to_string();
            state.sessions.load(&token).await.map(|data| (token, data))
        }
        None => None,
    };

    let (session, fresh) = match existing {
        Some((token, data)) => (CurrentSession { token, data }, false),
        None => {
            let data = SessionData::default();
            let token = state.sessions.create(data.clone()).await;
            tracing::debug!("Started new session");
            (CurrentSession { token, data }, true)
        }
    };
    let token = session.token.clone();
    request.extensions_mut().insert(session);

    let response = next.run(request).await;

    let handler_set_cookie = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&format!("{}=", cookie_name)));

    if fresh && !handler_set_cookie {
        (jar.add(session_cookie(&state.config, token)), response).into_response()
    } else {
        response
    }
}

pub fn session_cookie(config: &AppConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.session.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.session.secure_cookie)
        .build()
}

/// Gate for pages and actions that need a signed-in user.
///
/// On failure the session gets an error toast and the caller should return the
/// redirect to the login page.
pub async fn require_user(
    state: &AppState,
    session: &mut CurrentSession,
) -> Result<User, Response> {
    if let Some(user) = session.data.user.clone() {
        return Ok(user);
    }

    tracing::warn!("Rejected unauthenticated access");
    session.data.toast = Some(Toast::error("Please log in to access this page"));
    session.clone().commit(state).await;
    Err(Redirect::to("/?page=login").into_response())
}
