//! Suave Questionnaire API
//!
//! Questionnaire microservice: create questionnaires and collect survey
//! responses against them.
//!
//! ## REST Endpoints
//!
//! - `GET /api/questionnaire-service/v1/health` - Service health
//! - `POST /api/questionnaire-service/v1/questionnaires` - Create a questionnaire
//! - `GET /api/questionnaire-service/v1/questionnaires/{id}` - Fetch a questionnaire
//! - `POST /api/questionnaire-service/v1/questionnaires/{id}/responses` - Submit a response
//! - `GET /api/questionnaire-service/v1/questionnaires/{id}/responses` - List responses
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe

mod config;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use suave_db::pg::Repositories;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::{health, ready};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Suave Questionnaire API");

    // Load configuration
    let config = Config::from_env()?;

    // Create database pool
    let pool = suave_db::create_pool(&config.database_url).await?;

    // Bootstrap schema on a fresh database
    suave_db::schema::ensure_questionnaire_schema(&pool).await?;

    // Create repositories and application state
    let repos = Repositories::new(pool.clone());
    let state = AppState::new(repos, pool, config.clone());

    // Build HTTP router
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout();

    // Versioned API routes
    let api_v1 = Router::new()
        .route("/health", get(health))
        .route("/questionnaires", post(handlers::create_questionnaire))
        .route("/questionnaires/{id}", get(handlers::get_questionnaire))
        .route(
            "/questionnaires/{id}/responses",
            post(handlers::submit_response).get(handlers::list_responses),
        );

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .nest("/api/questionnaire-service/v1", api_v1)
        .layer(middleware)
        .merge(health_routes)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
