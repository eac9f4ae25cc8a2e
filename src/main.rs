//! Endpoint Availability Monitor Binary

use clap::Parser;
use clap::error::ErrorKind;
use endpoint_monitor::{
    AvailabilityLedger, HealthMonitor, HttpExecutor, LogFormat, MonitorConfig, Result,
    load_endpoints,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "endpoint_monitor",
    version,
    about = "Poll HTTP endpoints and report per-domain availability"
)]
struct Cli {
    /// YAML file listing the endpoints to check
    config_path: PathBuf,

    /// Seconds between check cycles
    #[arg(long, env = "CHECK_INTERVAL_SECONDS", default_value_t = 15)]
    interval_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECONDS", default_value_t = 10)]
    timeout_secs: u64,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl From<Cli> for MonitorConfig {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config_path,
            check_interval: Duration::from_secs(cli.interval_secs),
            http_timeout: Duration::from_secs(cli.timeout_secs),
            log_format: cli.log_format,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let config = MonitorConfig::from(cli);

    initialize_tracing(config.log_format);

    info!("Starting endpoint monitor v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("Monitor failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: MonitorConfig) -> Result<()> {
    let endpoints = load_endpoints(&config.config_path)?;
    info!(
        "Loaded {} endpoints from {}",
        endpoints.len(),
        config.config_path.display()
    );

    let executor = HttpExecutor::new(config.http_timeout)?;
    let mut monitor = HealthMonitor::new(
        endpoints,
        Box::new(executor),
        AvailabilityLedger::new(),
        config.check_interval,
    );

    let shutdown = Arc::new(Notify::new());
    tokio::spawn({
        let shutdown = Arc::clone(&shutdown);
        async move {
            match shutdown_signal().await {
                Ok(()) => {
                    info!("Shutting down...");
                    shutdown.notify_one();
                }
                Err(e) => error!("Failed to wait for shutdown signal: {}", e),
            }
        }
    });

    monitor.run(shutdown).await
}

/// Resolves on SIGINT, or SIGTERM on unix
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res?,
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    Ok(())
}

/// Initialize structured logging
fn initialize_tracing(format: LogFormat) {
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer.json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["endpoint_monitor", "endpoints.yaml"]).unwrap();
        let config = MonitorConfig::from(cli);

        assert_eq!(config.config_path, PathBuf::from("endpoints.yaml"));
        assert_eq!(config.check_interval, Duration::from_secs(15));
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_cli_requires_exactly_one_path() {
        assert!(Cli::try_parse_from(["endpoint_monitor"]).is_err());
        assert!(Cli::try_parse_from(["endpoint_monitor", "a.yaml", "b.yaml"]).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "endpoint_monitor",
            "endpoints.yaml",
            "--interval-secs",
            "5",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.interval_secs, 5);
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
