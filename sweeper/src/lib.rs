pub mod api;
pub mod config;
pub mod errors;
pub mod metrics_defs;
pub mod selection;

#[cfg(test)]
mod testutils;

use crate::api::AppState;
use crate::config::Config;
use crate::selection::UniformPicker;
use tokio::net::TcpListener;

/// Build the service from its configuration and serve it until the
/// process is terminated.
pub async fn run(config: Config) -> errors::Result<()> {
    let state = AppState::new(&config.airtable, Box::new(UniformPicker))?;
    let app = api::router(state);

    let listener =
        TcpListener::bind((config.listener.host.as_str(), config.listener.port)).await?;
    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        "server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
