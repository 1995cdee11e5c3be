//! HTTP API for the agent.

mod routes;
pub mod types;

pub use routes::{router, AppState};

use std::sync::Arc;

use crate::agent::Agent;
use crate::config::Config;

/// Start the HTTP server and block until it exits.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let agent = Arc::new(Agent::new(config)?);
    let app = router(AppState { agent });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
