mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(&server.base_url).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<serde_json::Value>().await?;
    assert!(payload["success"].as_bool().unwrap_or(false), "success=false: {}", payload);
    assert_eq!(payload["data"]["name"], "Parish API (Rust)");
    assert!(payload["data"]["endpoints"]["dues"].is_string());
    Ok(())
}

#[tokio::test]
async fn health_reports_database_state() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;
    // OK with a database, SERVICE_UNAVAILABLE without; either is a valid
    // report, never a crash
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    let payload = res.json::<serde_json::Value>().await?;
    assert!(payload["data"]["status"].is_string());
    Ok(())
}
