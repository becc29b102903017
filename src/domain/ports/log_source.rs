use async_trait::async_trait;

use crate::shared::error::FetchError;

/// Returns the full current text of the watched log resource.
#[async_trait]
pub trait LogSource: Send + Sync {
    async fn fetch_content(&self) -> Result<String, FetchError>;
}
