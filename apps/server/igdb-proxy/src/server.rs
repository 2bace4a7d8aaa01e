//! Router assembly and the serve loop.

use crate::error::ProxyError;
use crate::routes::{check_gog_handler, details_handler, health_handler, search_handler};
use crate::state::AppState;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::get;
use log::{error, info};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

const CORS_MAX_AGE: Duration = Duration::from_secs(60 * 60);

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(CORS_MAX_AGE);

    Router::new()
        .route("/search", get(search_handler))
        .route("/details/{id}", get(details_handler))
        .route("/checkGog", get(check_gog_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

/// Bind `address` and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns [`ProxyError::Startup`] if the address cannot be bound or the
/// server loop fails.
pub async fn run(address: &str, state: Arc<AppState>) -> Result<(), ProxyError> {
    info!("Binding to {address}");

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| ProxyError::startup(format!("Failed to bind {address}: {e}")))?;

    serve(listener, state, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ProxyError::Startup`] if the server loop fails.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<(), ProxyError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        info!("Server running on {address}");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ProxyError::startup(format!("Server error: {e}")))?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
