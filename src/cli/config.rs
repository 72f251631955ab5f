/// CLI-side settings, all environment-driven.

pub fn server_url() -> String {
    std::env::var("PARISH_SERVER_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

pub fn token() -> anyhow::Result<String> {
    std::env::var("PARISH_TOKEN")
        .map_err(|_| anyhow::anyhow!("PARISH_TOKEN is not set; log in and export an access token"))
}
