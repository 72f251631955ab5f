use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::jwt_auth_middleware;

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_public_routes())
        // Protected API behind the JWT middleware
        .merge(protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/auth/login/:role", post(auth::login))
        .route("/auth/refresh/:role", post(auth::refresh))
}

fn protected_routes() -> Router {
    Router::new()
        .merge(org_routes())
        .merge(event_routes())
        .merge(dues_routes())
        .merge(misc_routes())
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

fn org_routes() -> Router {
    use axum::routing::delete;
    use handlers::protected::{bavanakutayimas, churches, houses, members, units, users};

    Router::new()
        .route("/api/churches", get(churches::list).post(churches::create))
        .route(
            "/api/churches/:id",
            get(churches::get).put(churches::update).delete(churches::delete),
        )
        .route("/api/units", get(units::list).post(units::create))
        .route(
            "/api/units/:id",
            get(units::get).put(units::update).delete(units::delete),
        )
        .route(
            "/api/bavanakutayimas",
            get(bavanakutayimas::list).post(bavanakutayimas::create),
        )
        .route(
            "/api/bavanakutayimas/:id",
            get(bavanakutayimas::get)
                .put(bavanakutayimas::update)
                .delete(bavanakutayimas::delete),
        )
        .route("/api/houses", get(houses::list).post(houses::create))
        .route(
            "/api/houses/:id",
            get(houses::get).put(houses::update).delete(houses::delete),
        )
        .route("/api/members", get(members::list).post(members::create))
        .route(
            "/api/members/:id",
            get(members::get).put(members::update).delete(members::delete),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:id", delete(users::delete))
}

fn event_routes() -> Router {
    use axum::routing::{post, put};
    use handlers::protected::{campaigns, stothrakazhcha};

    Router::new()
        .route("/api/campaigns", get(campaigns::list).post(campaigns::create))
        .route("/api/campaigns/:id", get(campaigns::get))
        .route("/api/campaigns/:id/close", put(campaigns::close))
        .route("/api/campaigns/:id/contribute", post(campaigns::contribute))
        .route(
            "/api/stothrakazhcha",
            get(stothrakazhcha::list).post(stothrakazhcha::create),
        )
        .route("/api/stothrakazhcha/:id", get(stothrakazhcha::get))
        .route("/api/stothrakazhcha/:id/close", put(stothrakazhcha::close))
        .route(
            "/api/stothrakazhcha/:id/contribute",
            post(stothrakazhcha::contribute),
        )
}

fn dues_routes() -> Router {
    use axum::routing::post;
    use handlers::protected::dues;

    Router::new()
        .route("/api/dues", get(dues::list))
        .route("/api/dues/pay", post(dues::pay))
        .route("/api/campaign-dues/process", post(dues::process_campaign))
        .route(
            "/api/stothrakazhcha-dues/process",
            post(dues::process_stothrakazhcha),
        )
}

fn misc_routes() -> Router {
    use handlers::protected::{news, session, transactions};

    Router::new()
        .route("/api/auth/whoami", get(session::whoami))
        .route("/api/transactions", get(transactions::list))
        .route("/api/news", get(news::list).post(news::create))
        .route(
            "/api/news/:id",
            get(news::get).put(news::update).delete(news::delete),
        )
}

pub async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Parish API (Rust)",
            "version": version,
            "description": "Church administration and contribution tracking API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "public_auth": "/auth/login/:role, /auth/refresh/:role (public - token acquisition)",
                "churches": "/api/churches (protected)",
                "hierarchy": "/api/units, /api/bavanakutayimas, /api/houses, /api/members (protected)",
                "users": "/api/users (protected)",
                "campaigns": "/api/campaigns[/:id[/contribute]] (protected)",
                "stothrakazhcha": "/api/stothrakazhcha[/:id[/contribute]] (protected)",
                "dues": "/api/dues, /api/dues/pay, /api/*-dues/process (protected)",
                "transactions": "/api/transactions (protected)",
                "news": "/api/news (protected)",
            }
        }
    }))
}

pub async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
