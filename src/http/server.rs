//! Router assembly and server lifecycle

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::routes::{contact_routes, health_routes};
use crate::app::services::contact_service::ContactService;
use crate::config::ServerConfig;
use crate::telemetry::MemoryMonitor;
use crate::{Error, Result};

/// State shared by every handler
#[derive(Debug)]
pub struct AppState {
    pub service: ContactService,
    pub monitor: MemoryMonitor,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: ContactService) -> Self {
        Self {
            service,
            monitor: MemoryMonitor::new(),
            started_at: Instant::now(),
        }
    }
}

/// Build the API router with CORS and request tracing
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .nest("/api", health_routes(state.clone()).merge(contact_routes(state)))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind and serve until `shutdown` resolves
///
/// # Errors
/// `Error::Server` if the address cannot be bound or serving fails.
pub async fn serve<F>(state: Arc<AppState>, config: &ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::server(format!("Failed to bind {}: {}", addr, e)))?;

    let reporter = state.monitor.spawn_reporter(config.memory_report_secs);
    let router = build_router(state, config);

    info!("Listening on {}", addr);
    info!("API available at {}/api", config.api_url);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::server(format!("Server stopped unexpectedly: {}", e)));

    if let Some(handle) = reporter {
        handle.abort();
    }
    info!("Server shut down");
    served
}
