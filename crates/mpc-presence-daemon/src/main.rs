mod discord;
mod poll;

use clap::Parser;
use mpc_presence_core::config::AppConfig;
use mpc_presence_core::error::PresenceError;

/// Discord Rich Presence for the MPC-HC/MPC-BE web interface.
#[derive(Debug, Parser)]
#[command(name = "mpc-presence", version, about)]
struct Cli {
    /// Path to an alternate config file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Override the web interface port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the poll interval in seconds.
    #[arg(long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), PresenceError> {
    tracing_subscriber::fmt()
        .with_env_filter("mpc_presence_core=info,mpc_presence_daemon=info")
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(port) = cli.port {
        config.player.port = port;
    }
    if let Some(interval) = cli.interval {
        config.player.poll_interval = interval;
    }
    config.validate()?;

    tracing::info!(
        port = config.player.port,
        interval = config.player.poll_interval,
        "Starting mpc-presence"
    );

    let handle = discord::DiscordHandle::start();

    tokio::select! {
        _ = poll::run(&config, &handle) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }

    handle.shutdown();
    Ok(())
}
