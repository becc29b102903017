use async_trait::async_trait;

use crate::shared::error::SendError;

#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send(&self, endpoint: &str, body: &str) -> Result<(), SendError>;
}
