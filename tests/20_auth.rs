mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn protected_pages_redirect_to_login() -> Result<()> {
    let app = common::spawn_app().await?;

    for page in ["dashboard", "tickets"] {
        let mut browser = app.browser();
        let res = browser.get(&format!("/?page={}", page)).await?;
        assert_eq!(res.status, StatusCode::SEE_OTHER, "page {}", page);
        assert_eq!(res.location.as_deref(), Some("/?page=login"));

        let login = browser.page("login").await?;
        assert_eq!(login["toast"]["message"], "Please log in to access this page");
        assert_eq!(login["toast"]["type"], "error");
    }
    Ok(())
}

#[tokio::test]
async fn login_sets_user_and_flashes_once() -> Result<()> {
    let app = common::spawn_app().await?;
    let mut browser = app.browser();

    browser.login().await?;

    let dashboard = browser.page("dashboard").await?;
    assert_eq!(dashboard["user"]["email"], "agent@example.com");
    assert_eq!(dashboard["toast"]["message"], "Logged in successfully!");
    assert_eq!(dashboard["toast"]["type"], "success");

    // The toast is consumed by the first render
    let again = browser.page("dashboard").await?;
    assert!(again["toast"].is_null());
    assert_eq!(again["user"]["email"], "agent@example.com");
    Ok(())
}

#[tokio::test]
async fn signup_behaves_like_login() -> Result<()> {
    let app = common::spawn_app().await?;
    let mut browser = app.browser();

    let res = browser
        .post("/?action=signup", &[("email", "new@example.com"), ("password", "hunter22")])
        .await?;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/?page=dashboard"));

    let dashboard = browser.page("dashboard").await?;
    assert_eq!(dashboard["toast"]["message"], "Signed up successfully!");
    assert_eq!(dashboard["user"]["email"], "new@example.com");
    Ok(())
}

#[tokio::test]
async fn invalid_credentials_redirect_back_with_field_errors() -> Result<()> {
    let app = common::spawn_app().await?;
    let mut browser = app.browser();

    let res = browser
        .post("/?action=login", &[("email", "nope"), ("password", "123")])
        .await?;
    assert_eq!(res.location.as_deref(), Some("/?page=login"));

    let login = browser.page("login").await?;
    assert!(login["user"].is_null());
    assert_eq!(login["toast"]["message"], "Please fix the errors");
    assert_eq!(login["errors"]["email"], "Email is invalid");
    assert_eq!(login["errors"]["password"], "Password must be at least 6 characters");

    // Field errors are one-shot as well
    let login = browser.page("login").await?;
    assert!(login["errors"].as_object().map(|m| m.is_empty()).unwrap_or(false));

    let res = browser.post("/?action=signup", &[]).await?;
    assert_eq!(res.location.as_deref(), Some("/?page=signup"));
    let signup = browser.page("signup").await?;
    assert_eq!(signup["errors"]["email"], "Email is required");
    assert_eq!(signup["errors"]["password"], "Password is required");
    Ok(())
}

#[tokio::test]
async fn logout_clears_session_and_rotates_cookie() -> Result<()> {
    let app = common::spawn_app().await?;
    let mut browser = app.browser();
    browser.login().await?;
    let old_token = browser.session.clone();

    let res = browser.get("/?action=logout").await?;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/?page=landing"));
    assert_ne!(browser.session, old_token);

    let landing = browser.page("landing").await?;
    assert!(landing["user"].is_null());
    assert_eq!(landing["toast"]["message"], "Logged out successfully");

    let res = browser.get("/?page=tickets").await?;
    assert_eq!(res.location.as_deref(), Some("/?page=login"));
    Ok(())
}
