use std::path::{Path, PathBuf};

use crate::shared::app_config::AppConfig;

/// Everything needed to act on a change event. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    path: PathBuf,
    container_id: String,
    webhook_url: String,
}

impl WatchTarget {
    pub fn new(
        path: impl Into<PathBuf>,
        container_id: impl Into<String>,
        webhook_url: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            container_id: container_id.into(),
            webhook_url: webhook_url.into(),
        }
    }

    pub fn from_config(config: &AppConfig, container_id: impl Into<String>) -> Self {
        Self::new(&config.log_dir, container_id, &config.webhook_url)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}
