use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::{domain::ports::message_transport::MessageTransport, shared::error::SendError};

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// Posts message bodies to a Discord-compatible webhook.
#[derive(Debug, Clone, Default)]
pub struct DiscordWebhookTransport {
    client: reqwest::Client,
}

impl DiscordWebhookTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageTransport for DiscordWebhookTransport {
    async fn send(&self, endpoint: &str, body: &str) -> Result<(), SendError> {
        let response = self
            .client
            .post(endpoint)
            .json(&WebhookMessage { content: body })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        debug!(status = status.as_u16(), "webhook accepted message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    // Answers a single HTTP request with `status_line` and returns the raw request.
    async fn one_shot_server(status_line: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some((head, body)) = text.split_once("\r\n\r\n") {
                    let length = head
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if body.len() >= length {
                        break;
                    }
                }
            }
            let response = format!("{status_line}\r\ncontent-length: 2\r\nconnection: close\r\n\r\nno");
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });
        (format!("http://{addr}/api/webhooks/1/token"), handle)
    }

    #[tokio::test]
    async fn test_posts_content_as_json() {
        let (endpoint, server) = one_shot_server("HTTP/1.1 200 OK").await;
        let transport = DiscordWebhookTransport::new();

        transport.send(&endpoint, "```hello```").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/webhooks/1/token"));
        assert!(request.contains(r#"{"content":"```hello```"}"#));
    }

    #[tokio::test]
    async fn test_error_status_is_send_error() {
        let (endpoint, server) = one_shot_server("HTTP/1.1 429 Too Many Requests").await;
        let transport = DiscordWebhookTransport::new();

        let err = transport.send(&endpoint, "body").await.unwrap_err();
        assert!(matches!(err, SendError::Status { status: 429, .. }));
        server.await.unwrap();
    }
}
