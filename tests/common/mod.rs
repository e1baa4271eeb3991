#![allow(dead_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::StatusCode;
use serde_json::Value;
use tempfile::TempDir;

use helpdesk::config::AppConfig;
use helpdesk::views::{RenderError, ViewContext, ViewRenderer};
use helpdesk::{app, AppState};

pub const COOKIE_NAME: &str = "helpdesk_session";

/// Renders the view context as JSON so tests can assert on what a page would show.
pub struct JsonRenderer;

impl ViewRenderer for JsonRenderer {
    fn render(&self, page: &str, ctx: &ViewContext) -> Result<String, RenderError> {
        match page {
            "landing" | "login" | "signup" | "dashboard" | "tickets" => {
                Ok(serde_json::to_string(ctx).expect("view context serializes"))
            }
            other => Err(RenderError::NotFound(other.to_string())),
        }
    }
}

pub struct TestApp {
    pub base_url: String,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub fn browser(&self) -> Browser {
        Browser::new(&self.base_url)
    }
}

/// Starts the app in-process on a free port, backed by a fresh temp ticket file.
pub async fn spawn_app() -> Result<TestApp> {
    spawn_with(|state| state.with_renderer(JsonRenderer)).await
}

pub async fn spawn_html_app() -> Result<TestApp> {
    spawn_with(|state| state).await
}

async fn spawn_with(customize: impl FnOnce(AppState) -> AppState) -> Result<TestApp> {
    let dir = TempDir::new().context("failed to create temp dir")?;
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;

    let mut config = AppConfig::development();
    config.server.port = port;
    config.storage.tickets_file = dir.path().join("data").join("tickets.json");
    config.session.cookie_name = COOKIE_NAME.to_string();

    let state = customize(AppState::new(config));
    let router = app(state.clone());

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(TestApp {
        base_url: format!("http://127.0.0.1:{}", port),
        state,
        _dir: dir,
    })
}

pub struct Response {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Response {
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).with_context(|| format!("body is not JSON: {}", self.body))
    }
}

/// Minimal cookie-carrying client; redirects are not followed so tests can see them.
pub struct Browser {
    client: reqwest::Client,
    base_url: String,
    pub session: Option<String>,
}

impl Browser {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(10))
            .build()
            .expect("client builds");
        Self {
            client,
            base_url: base_url.to_string(),
            session: None,
        }
    }

    pub async fn get(&mut self, path: &str) -> Result<Response> {
        let req = self.client.get(format!("{}{}", self.base_url, path));
        self.send(req).await
    }

    pub async fn post(&mut self, path: &str, form: &[(&str, &str)]) -> Result<Response> {
        let req = self.client.post(format!("{}{}", self.base_url, path)).form(form);
        self.send(req).await
    }

    async fn send(&mut self, mut req: reqwest::RequestBuilder) -> Result<Response> {
        if let Some(token) = &self.session {
            req = req.header(COOKIE, format!("{}={}", COOKIE_NAME, token));
        }
        let res = req.send().await?;

        for value in res.headers().get_all(SET_COOKIE) {
            let value = value.to_str()?;
            if let Some(rest) = value.strip_prefix(&format!("{}=", COOKIE_NAME)) {
                let token = rest.split(';').next().unwrap_or_default();
                self.session = Some(token.to_string());
            }
        }

        let status = res.status();
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = res.text().await?;
        Ok(Response { status, location, body })
    }

    /// Signs in with well-formed credentials and asserts the redirect.
    pub async fn login(&mut self) -> Result<()> {
        let res = self
            .post("/?action=login", &[("email", "agent@example.com"), ("password", "secret1")])
            .await?;
        anyhow::ensure!(
            res.location.as_deref() == Some("/?page=dashboard"),
            "login did not redirect to dashboard: {:?}",
            res.location
        );
        Ok(())
    }

    /// Fetches a page rendered by `JsonRenderer` and returns its context.
    pub async fn page(&mut self, name: &str) -> Result<Value> {
        let res = self.get(&format!("/?page={}", name)).await?;
        anyhow::ensure!(res.status == StatusCode::OK, "page {} returned {}", name, res.status);
        res.json()
    }
}
