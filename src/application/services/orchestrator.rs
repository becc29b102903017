use tokio::{signal, sync::watch};
use tracing::{error, info};

use crate::{
    application::services::{change_watcher::ChangeWatcher, notifier::Notifier},
    domain::value_objects::watch_target::WatchTarget,
    infrastructure::{
        discord_webhook::DiscordWebhookTransport,
        docker::{DockerExecSource, resolve_container_id},
    },
    shared::{app_config::AppConfig, error::SetupError},
};

/// Wires configuration to the watcher. Holds no business logic.
pub struct Orchestrator {
    config: AppConfig,
}

impl Orchestrator {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self, shutdown: watch::Receiver<bool>) -> Result<(), SetupError> {
        let config = &self.config;
        let container_id = resolve_container_id(&config.docker_bin, &config.container_name).await?;
        let target = WatchTarget::from_config(config, container_id);

        let source = DockerExecSource::from_config(config, target.container_id());
        let notifier =
            Notifier::new(DiscordWebhookTransport::new()).with_retries(config.delivery_retries);
        let mut watcher = ChangeWatcher::new(source, notifier);

        info!(
            container = %config.container_name,
            path = %target.path().display(),
            "starting log notifier"
        );
        watcher.run(&target, shutdown).await
    }
}

/// Flips the returned receiver to `true` on Ctrl-C or SIGTERM.
pub fn spawn_shutdown_listener() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received");
        let _ = tx.send(true);
        // Keep the sender alive so the watcher does not read a dropped channel
        // before it has seen the flag.
        tx.closed().await;
    });
    rx
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
