use anyhow::Context;

use crate::cli::config;

pub async fn handle() -> anyhow::Result<()> {
    let url = format!("{}/health", config::server_url());
    let response = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .with_context(|| format!("failed to reach {}", url))?;

    let status = response.status();
    let body: serde_json::Value = response.json().await.context("invalid health response")?;
    println!("{} {}", status, serde_json::to_string_pretty(&body)?);
    Ok(())
}
