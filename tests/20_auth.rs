mod common;

use anyhow::Result;
use reqwest::StatusCode;

// Token gating happens before any database access, so these tests run with or
// without a configured DATABASE_URL.

#[tokio::test]
async fn protected_routes_require_a_bearer_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/dues", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["success"], false);
    assert_eq!(payload["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn malformed_bearer_tokens_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/campaigns", server.base_url))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn basic_auth_scheme_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/members", server.base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_rejects_unknown_roles_before_touching_the_database() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login/archbishop", server.base_url))
        .json(&serde_json::json!({ "username": "x", "password": "y" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["success"], false);
    assert!(
        payload["error"].as_str().unwrap_or_default().contains("unknown role"),
        "unexpected error: {}",
        payload
    );
    Ok(())
}

#[tokio::test]
async fn refresh_rejects_garbage_tokens() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/refresh/church_admin", server.base_url))
        .json(&serde_json::json!({ "refreshToken": "garbage" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
