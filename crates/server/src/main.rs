use server::config;
use server::routes;
use server::state::AppState;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    // First access loads and validates the embedded puzzle catalog, so bad
    // data fails at boot rather than on the first request.
    let _ = chess_trainer::Catalog::builtin();

    let state = AppState::new();

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Puzzle trainer
        .route("/api/puzzles/session", post(routes::puzzles::create_session))
        .route("/api/puzzles/session/{id}", get(routes::puzzles::get_session))
        .route("/api/puzzles/session/{id}/move", post(routes::puzzles::submit_move))
        .route("/api/puzzles/session/{id}/solution", get(routes::puzzles::reveal_solution))
        .route("/api/puzzles/session/{id}/next", post(routes::puzzles::next_puzzle))
        // Explorer
        .route("/api/explorer/session", post(routes::explorer::create_session))
        .route("/api/explorer/session/{id}", get(routes::explorer::get_session))
        .route("/api/explorer/session/{id}/move", post(routes::explorer::submit_move))
        .route("/api/explorer/session/{id}/navigate", post(routes::explorer::navigate))
        .route("/api/explorer/session/{id}/moves", get(routes::explorer::legal_targets))
        // Shared state
        .layer(Extension(state))
        .layer(Extension(config.clone()))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
