use clap::Parser;
use sweeper::config::Config;
use sweeper::errors::SweeperError;
use tokio::signal::unix::{SignalKind, signal};

/// Deletes a randomly chosen record from an Airtable table.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Override the listen host from the environment
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port from the environment
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), SweeperError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.listener.host = host;
    }
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    tokio::spawn(exit_on_signal());

    sweeper::run(config).await
}

/// Terminate immediately on SIGINT or SIGTERM. In-flight requests are
/// not drained; the deploy environment restarts the process.
async fn exit_on_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!(error = %e, "failed to install SIGTERM handler");
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("SIGINT received, shutting down"),
        _ = sigterm.recv() => tracing::info!("SIGTERM received, shutting down"),
    }

    std::process::exit(0);
}
