//! followwatch - follow/unfollow notifications for a Twitter account.
//!
//! CLI entry point.

use clap::Parser;
use followwatch::notify::{ConsoleOutput, DirectMessageNotifier, Notifier};
use followwatch::{Config, Settings, TwitterClient, Watcher};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("followwatch=debug,info")
    } else {
        EnvFilter::new("followwatch=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

async fn run(config: Config) -> Result<(), ExitCode> {
    let settings = match Settings::load(&config.config_path) {
        Ok(s) => s,
        Err(e) => {
            error!("Error loading config [{}]: {}", config.config_path.display(), e);
            return Err(ExitCode::FAILURE);
        }
    };

    let client = match TwitterClient::from_settings(&settings, &config.http_config()) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to create Twitter client: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    let notifier: Arc<dyn Notifier> = if config.dry_run {
        let console = ConsoleOutput::default();
        console.print_info("Dry run: notifications are printed, not sent");
        Arc::new(console)
    } else {
        Arc::new(DirectMessageNotifier::new(client.clone()))
    };

    info!(
        "Watching @{} every {} minute(s)",
        settings.screen_name(),
        settings.refresh_time
    );

    let watcher = Watcher::new(
        client,
        notifier,
        settings.screen_name(),
        settings.refresh_interval(),
    )
    .with_startup_notification(settings.notify_on_start);

    // Startup failures are logged by the watcher.
    if watcher.run(shutdown_signal()).await.is_err() {
        return Err(ExitCode::FAILURE);
    }

    Ok(())
}

/// Completes on SIGTERM or SIGINT.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {},
                    _ = sigint.recv() => {},
                }
            }
            _ => {
                warn!("Failed to register signal handlers, falling back to Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
