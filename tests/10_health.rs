mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = common::spawn_app().await?;
    let mut browser = app.browser();

    let res = browser.get("/health").await?;
    assert_eq!(res.status, StatusCode::OK);

    let body = res.json()?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["tickets"], 0);
    Ok(())
}

#[tokio::test]
async fn health_bootstraps_ticket_document() -> Result<()> {
    let app = common::spawn_app().await?;
    let path = app.state.store.path().to_path_buf();
    assert!(!path.exists());

    app.browser().get("/health").await?;

    assert!(path.exists());
    let contents = std::fs::read_to_string(&path)?;
    assert_eq!(serde_json::from_str::<serde_json::Value>(&contents)?, serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn health_reports_degraded_on_corrupt_document() -> Result<()> {
    let app = common::spawn_app().await?;
    let path = app.state.store.path().to_path_buf();
    std::fs::create_dir_all(path.parent().unwrap())?;
    std::fs::write(&path, "{ definitely not a ticket list")?;

    let res = app.browser().get("/health").await?;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.json()?["success"], false);
    Ok(())
}
