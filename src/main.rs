use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod api;
mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod state;
mod store;
mod validation;

use state::AppState;
use store::{JsonFileDocument, TaskStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PORT, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting tareas API in {:?} mode", config.environment);

    if config.using_default_secret() {
        tracing::warn!("JWT_SECRET is unset; signing tokens with the insecure development default");
    }

    let db = database::connect(&config.storage.database_url).await?;
    database::init_schema(&db).await?;

    let tasks = TaskStore::new(Box::new(JsonFileDocument::new(
        config.storage.tasks_file.clone(),
    )));
    let state = AppState {
        db,
        tasks: Arc::new(tasks),
    };

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("tareas API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes (credential issuance)
        .merge(auth_public_routes())
        // Protected resources behind the bearer-token gate
        .merge(tareas_routes())
        .merge(items_routes())
        .fallback(not_found)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
}

fn tareas_routes() -> Router<AppState> {
    use axum::middleware::from_fn;
    use axum::routing::put;
    use handlers::protected::tareas;

    Router::new()
        .route("/tareas", get(tareas::list).post(tareas::create))
        .route("/tareas/:id", put(tareas::update).delete(tareas::remove))
        .route_layer(from_fn(middleware::auth::jwt_auth_middleware))
}

fn items_routes() -> Router<AppState> {
    use axum::middleware::from_fn;
    use handlers::protected::items;

    Router::new()
        .route("/api/items", get(items::list).post(items::create))
        .route_layer(from_fn(middleware::auth::jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Tareas API (Rust)",
        "version": version,
        "endpoints": {
            "auth": {
                "register": "POST /api/auth/register",
                "login": "POST /api/auth/login",
            },
            "tareas": {
                "list": "GET /tareas (token required)",
                "create": "POST /tareas (token required)",
                "update": "PUT /tareas/:id (token required)",
                "delete": "DELETE /tareas/:id (token required)",
            },
            "items": {
                "list": "GET /api/items (token required)",
                "create": "POST /api/items (token required)",
            },
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "timestamp": now, "error": e.to_string() })),
        ),
    }
}

async fn not_found(uri: Uri) -> impl axum::response::IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "route not found", "path": uri.path() })),
    )
}
