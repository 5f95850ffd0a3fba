//! Reference REST API
//!
//! A small axum server over the in-memory record store, speaking the wire
//! format the board client expects.
//!
//! # Endpoints
//!
//! - `GET /` - Service info
//! - `GET /api/health` - Liveness probe
//! - `GET /api/categories` - Categories with their cards
//! - `POST /api/cards` - Create a card
//! - `PUT /api/cards/:id` - Update a card's dish and dietary text
//! - `PUT /api/cards/:id/category` - Move a card
//! - `DELETE /api/cards/:id` - Delete a card
//!
//! # Example
//!
//! ```rust,ignore
//! use party_board::api::{serve, AppState};
//! use party_board::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     serve(AppState::seeded(config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use state::AppState;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/categories", get(routes::categories::list_categories))
        .route("/cards", post(routes::cards::create_card))
        .route(
            "/cards/:id",
            put(routes::cards::update_card).delete(routes::cards::delete_card),
        )
        .route("/cards/:id/category", put(routes::cards::move_card));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::health::info))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Party board API listening on {}", addr);
    serve_listener(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_listener<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Party board API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
