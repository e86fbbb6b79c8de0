use puredelhi_api::Server;
use puredelhi_core::{DashboardConfig, DashboardError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> puredelhi_core::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "puredelhi_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::load().map_err(|e| DashboardError::Config(e.to_string()))?;
    let server = Server::new(config)?;
    server.run().await
}
