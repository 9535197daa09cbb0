//! HTTP server for the contact mailer.
//!
//! Exposes the mail dispatch function over HTTP with axum, plus a health
//! check for the hosting platform.

pub mod handlers;

pub use handlers::{dispatch_handler, health_handler};

use crate::metrics::Metrics;
use crate::services::MailDispatchService;
use anyhow::Result;
use axum::{
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Relative endpoint the form client posts to.
pub const DISPATCH_PATH: &str = "/api/send-email";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn MailDispatchService>,
    pub metrics: Option<Metrics>,
}

impl AppState {
    pub fn new(dispatcher: Arc<dyn MailDispatchService>, metrics: Option<Metrics>) -> Self {
        Self {
            dispatcher,
            metrics,
        }
    }
}

/// Build the application router.
///
/// The static site may live on another origin, so CORS is permissive.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(dispatch_handler))
        .route(DISPATCH_PATH, any(dispatch_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `router` on `bind_address` until Ctrl-C.
pub async fn run_server(router: Router, bind_address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
