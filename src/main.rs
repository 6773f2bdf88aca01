use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use panelmon::config;
use panelmon::display::SerialPanel;
use panelmon::metrics::MetricsSource;
use panelmon::scheduler::{Scheduler, ShutdownToken};

/// Cancels the token on the first termination signal, then exits.
#[cfg(unix)]
async fn watch_signals(shutdown: ShutdownToken) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            error!("failed to register SIGTERM handler: {e}");
            return;
        }
    };
    let mut quit = match signal(SignalKind::quit()) {
        Ok(stream) => stream,
        Err(e) => {
            error!("failed to register SIGQUIT handler: {e}");
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("received SIGINT, stopping"),
        _ = term.recv() => info!("received SIGTERM, stopping"),
        _ = quit.recv() => info!("received SIGQUIT, stopping"),
    }
    shutdown.cancel();
}

#[cfg(not(unix))]
async fn watch_signals(shutdown: ShutdownToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to register Ctrl-C handler: {e}");
        return;
    }
    info!("received Ctrl-C, stopping");
    shutdown.cancel();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> panelmon::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!(port = config::COM_PORT, "opening panel");
    let panel = SerialPanel::open(config::COM_PORT)?;
    let metrics = MetricsSource::new()?;
    info!(gpus = metrics.gpu_count(), "metrics source ready");

    let shutdown = ShutdownToken::default();
    tokio::spawn(watch_signals(shutdown.clone()));

    Scheduler::new(panel, metrics).run(shutdown).await
}
