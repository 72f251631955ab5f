use parish_api_rust::config;
use parish_api_rust::database::manager::DatabaseManager;
use parish_api_rust::server;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Parish API in {:?} mode", config.environment);

    // Apply the schema off the accept path; a down database surfaces via
    // /health instead of blocking startup.
    tokio::spawn(async {
        if let Err(e) = DatabaseManager::migrate().await {
            tracing::warn!("schema not applied at startup: {}", e);
        }
    });

    let app = server::app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("PARISH_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Parish API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
