mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn default_page_is_landing() -> Result<()> {
    let app = common::spawn_app().await?;
    let page = app.browser().page("landing").await?;
    assert_eq!(page["page"], "landing");

    let res = app.browser().get("/").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()?["page"], "landing");
    Ok(())
}

#[tokio::test]
async fn unknown_page_falls_back_to_landing() -> Result<()> {
    let app = common::spawn_app().await?;
    let res = app.browser().get("/?page=admin").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let body = res.json()?;
    assert_eq!(body["page"], "landing");
    assert_eq!(body["toast"]["message"], "Page not found");
    assert_eq!(body["toast"]["type"], "error");
    Ok(())
}

#[tokio::test]
async fn unknown_action_renders_page() -> Result<()> {
    let app = common::spawn_app().await?;
    let res = app.browser().get("/?action=drop_tables&page=signup").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()?["page"], "signup");
    Ok(())
}

#[tokio::test]
async fn first_visit_sets_http_only_session_cookie() -> Result<()> {
    let app = common::spawn_app().await?;
    let mut browser = app.browser();
    assert!(browser.session.is_none());

    browser.get("/?page=landing").await?;
    let token = browser.session.clone().expect("session cookie set");
    assert!(!token.is_empty());

    // An existing session is reused, not replaced
    browser.get("/?page=landing").await?;
    assert_eq!(browser.session.as_deref(), Some(token.as_str()));
    Ok(())
}

#[tokio::test]
async fn html_renderer_shows_tickets_escaped() -> Result<()> {
    let app = common::spawn_html_app().await?;
    let mut browser = app.browser();
    browser.login().await?;

    browser
        .post("/?action=create_ticket", &[("title", "<b>Broken</b> & bent")])
        .await?;

    let res = browser.get("/?page=tickets").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Ticket created successfully"));
    assert!(res.body.contains("&lt;b&gt;Broken&lt;/b&gt; &amp; bent"));
    assert!(!res.body.contains("<b>Broken</b>"));
    assert!(res.body.contains("agent@example.com"));

    let res = browser.get("/?page=nowhere").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.contains("Page not found"));
    Ok(())
}
