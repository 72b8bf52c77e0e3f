/// leadline: multi-tenant CRM backend
///
/// Main entry point. Reads configuration from the environment and serves:
/// - REST API at /api/*
/// - Liveness probe at /healthz

use leadline::{config::Config, server::start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    start_server(config).await
}
