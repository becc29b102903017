use std::path::PathBuf;

use async_trait::async_trait;

use crate::{domain::ports::log_source::LogSource, shared::error::FetchError};

/// Reads the log straight from the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LogSource for LocalFileSource {
    async fn fetch_content(&self) -> Result<String, FetchError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(content)
    }
}
