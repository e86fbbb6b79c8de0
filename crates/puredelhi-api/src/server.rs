use crate::{create_router, AppState};
use puredelhi_core::{DashboardConfig, DashboardError, Result};
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

pub struct Server {
    state: AppState,
    addr: SocketAddr,
}

impl Server {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| DashboardError::Config(format!("Invalid bind address: {e}")))?;
        let state = AppState::new(config)?;
        Ok(Self { state, addr })
    }

    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state);

        info!("Starting PureDelhi API server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(DashboardError::Io)?;

        info!("Server listening on http://{}", self.addr);
        info!("API documentation:");
        info!("  GET  /health - Health check");
        info!("  POST /api/auth/signup - Register");
        info!("  POST /api/auth/login - Login");
        info!("  GET  /api/wards - All 274 wards");
        info!("  GET  /api/wards/{{id}} - Ward by ID");
        info!("  POST /api/wards/seed - Regenerate ward dataset");
        info!("  POST /api/reports - File a pollution report (auth)");
        info!("  GET  /api/reports/my - Own reports (auth)");
        info!("  POST /api/ai/advice - AI health advice");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DashboardError::Io(e.into()))?;

        Ok(())
    }
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
