use anyhow::Context;
use clap::Subcommand;

use crate::cli::config;

#[derive(Subcommand)]
pub enum DuesCommands {
    #[command(about = "Run the due-processing sweep for campaigns")]
    ProcessCampaigns,

    #[command(about = "Run the due-processing sweep for stothrakazhcha weeks")]
    ProcessStothrakazhcha,
}

pub async fn handle(cmd: DuesCommands) -> anyhow::Result<()> {
    let path = match cmd {
        DuesCommands::ProcessCampaigns => "/api/campaign-dues/process",
        DuesCommands::ProcessStothrakazhcha => "/api/stothrakazhcha-dues/process",
    };

    let url = format!("{}{}", config::server_url(), path);
    let response = reqwest::Client::new()
        .post(&url)
        .bearer_auth(config::token()?)
        .json(&serde_json::json!({}))
        .send()
        .await
        .with_context(|| format!("failed to reach {}", url))?;

    let status = response.status();
    let body: serde_json::Value = response.json().await.context("invalid process response")?;
    if !status.is_success() {
        anyhow::bail!("processing failed ({}): {}", status, body);
    }
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
