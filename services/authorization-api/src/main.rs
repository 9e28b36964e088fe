//! Suave Authorization API
//!
//! Authorization microservice: account registration and bearer-token
//! session lifecycle backed by an in-process revocation cache.
//!
//! ## REST Endpoints
//!
//! - `GET /api/authorization-service/v1/health` - Service health
//! - `POST /api/authorization-service/v1/sign-up` - Register an account
//! - `POST /api/authorization-service/v1/sign-in` - Exchange credentials for a bearer token
//! - `POST /api/authorization-service/v1/token` - Rotate a live token
//! - `POST /api/authorization-service/v1/sign-out` - Revoke a live token
//! - `GET /api/authorization-service/v1/me` - Current account info
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use suave_auth_core::{AuthService, MokaTokenCache};
use suave_db::pg::Repositories;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::{health, ready};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("authorization_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Suave Authorization API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        token_ttl_secs = config.auth.token_ttl.as_secs(),
        "Configuration loaded"
    );

    // Initialize metrics
    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Create database pool
    let pool = suave_db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Bootstrap schema on a fresh database
    suave_db::schema::ensure_auth_schema(&pool).await?;

    // Create repositories
    let repos = Repositories::new(pool.clone());

    // Token cache shares the token lifetime so revocation state cannot
    // outlive the tokens it tracks
    let cache = MokaTokenCache::new(config.auth.token_ttl, config.auth.cache_capacity);

    // Create the auth service
    let auth = AuthService::new(
        &config.auth,
        Arc::new(repos.users.clone()),
        Arc::new(cache),
    );

    // Create application state
    let state = AppState::new(Arc::new(auth), repos, pool, config.clone());

    // Build HTTP router
    let app = build_router(state, metrics_handle);

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

fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    // Versioned API routes
    let api_v1 = Router::new()
        .route("/health", get(health))
        .route("/sign-up", post(handlers::sign_up))
        .route("/sign-in", post(handlers::sign_in))
        .route("/token", post(handlers::refresh_token))
        .route("/sign-out", post(handlers::sign_out))
        .route("/me", get(handlers::me));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        // Request ID propagation (outermost)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        // Tracing with request details
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Request timeout (innermost - closest to handler)
        .layer(TimeoutLayer::new(request_timeout));

    // Combine all routes
    Router::new()
        .nest("/api/authorization-service/v1", api_v1)
        .layer(middleware)
        .merge(health_routes) // Health routes without timeout
        .merge(metrics_route) // Metrics route without timeout
        .with_state(state)
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // scrypt dominates sign-up and sign-in latency, so the buckets reach
    // further right than a typical CRUD service
    let auth_latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

    let builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            auth_latency_buckets,
        )?
        .set_buckets_for_metric(
            Matcher::Full("auth_operation_duration_seconds".to_string()),
            auth_latency_buckets,
        )?;

    let handle = builder.install_recorder()?;

    // Register metrics with descriptions
    metrics::describe_counter!("auth_sign_ups_total", "Total accounts registered");
    metrics::describe_counter!(
        "auth_tokens_issued_total",
        "Total bearer tokens issued by source"
    );
    metrics::describe_counter!("auth_sign_outs_total", "Total tokens revoked by sign-out");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds"
    );
    metrics::describe_histogram!(
        "auth_operation_duration_seconds",
        "Auth operation latency in seconds by operation type"
    );

    Ok(handle)
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
