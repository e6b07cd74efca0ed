mod auth;
mod error;
mod extract;
mod routes;
mod state;
#[cfg(test)]
pub mod test_utils;

use abi::Config;
use booking::BookingManager;
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tracing::info;

pub use auth::AdminSession;
pub use error::ApiError;
pub use extract::{JsonBody, PathParam, QueryParams};
pub use routes::router;
pub use state::AppState;

pub async fn start_server(config: &Config) -> Result<(), anyhow::Error> {
    info!("Connecting to {}:{}", config.db.host, config.db.port);
    let manager = BookingManager::from_config(&config.db).await?;
    let state = AppState::new(manager, &config.auth);
    if state.admin_token.is_empty() {
        info!("No admin token configured, admin API is disabled");
    }

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server running on {}", config.server.url(false));

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
