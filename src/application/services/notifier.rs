use std::time::Duration;

use tracing::{debug, info};
use tryhard::{RetryFutureConfig, retry_fn};

use crate::{
    domain::{
        entities::{log_record::LogRecord, notification_state::NotificationState},
        ports::message_transport::MessageTransport,
        services::{message_renderer::MessageRenderer, notification_gate::NotificationGate},
    },
    shared::error::NotifyError,
};

const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Delivered,
    Suppressed,
}

pub struct Notifier<T> {
    transport: T,
    delivery_retries: u32,
}

impl<T: MessageTransport> Notifier<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            delivery_retries: 0,
        }
    }

    /// Extra attempts after the first failed delivery.
    pub fn with_retries(mut self, delivery_retries: u32) -> Self {
        self.delivery_retries = delivery_retries;
        self
    }

    pub async fn notify(
        &self,
        record: &LogRecord,
        endpoint: &str,
        state: &mut NotificationState,
    ) -> Result<NotifyOutcome, NotifyError> {
        self.deliver(MessageRenderer::render(record), endpoint, state)
            .await
    }

    /// Sends an already rendered body unless it repeats the last delivery.
    /// `state` only changes once the transport confirms the send.
    pub async fn deliver(
        &self,
        body: String,
        endpoint: &str,
        state: &mut NotificationState,
    ) -> Result<NotifyOutcome, NotifyError> {
        if !NotificationGate::should_send(&body, state) {
            info!("skipping duplicate notification");
            debug!(body = %body, "suppressed body");
            return Ok(NotifyOutcome::Suppressed);
        }

        let config = RetryFutureConfig::new(self.delivery_retries)
            .exponential_backoff(RETRY_BASE_DELAY)
            .max_delay(RETRY_MAX_DELAY);
        retry_fn(|| self.transport.send(endpoint, &body))
            .with_config(config)
            .await?;

        info!("notification delivered");
        state.record_sent(body);
        Ok(NotifyOutcome::Delivered)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    };

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::shared::error::SendError;

    /// Records every body it is asked to send; fails the first `failures` calls.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingTransport {
        pub sent: Arc<Mutex<Vec<(String, String)>>>,
        pub failures: Arc<AtomicU32>,
    }

    impl RecordingTransport {
        pub fn failing(failures: u32) -> Self {
            Self {
                sent: Arc::default(),
                failures: Arc::new(AtomicU32::new(failures)),
            }
        }

        pub fn bodies(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(_, body)| body.clone())
                .collect()
        }
    }

    #[async_trait]
    impl MessageTransport for RecordingTransport {
        async fn send(&self, endpoint: &str, body: &str) -> Result<(), SendError> {
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(SendError::Status {
                    status: 500,
                    body: "unavailable".to_string(),
                });
            }
            self.sent
                .lock()
                .unwrap()
                .push((endpoint.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn record() -> LogRecord {
        LogRecord {
            timestamp: Utc.with_ymd_and_hms(2023, 5, 17, 13, 3, 52).unwrap(),
            method: "GET".to_string(),
            host: "example.test".to_string(),
            client_ip: "50.230.198.1".to_string(),
            user_agent: "Mozilla/5.0 Test".to_string(),
            status_code: 200,
        }
    }

    #[tokio::test]
    async fn test_first_send_delivers_and_repeat_is_suppressed() {
        let transport = RecordingTransport::default();
        let notifier = Notifier::new(transport.clone());
        let mut state = NotificationState::new();

        let first = notifier.notify(&record(), "http://hook", &mut state).await.unwrap();
        let second = notifier.notify(&record(), "http://hook", &mut state).await.unwrap();

        assert_eq!(first, NotifyOutcome::Delivered);
        assert_eq!(second, NotifyOutcome::Suppressed);
        assert_eq!(transport.bodies(), vec![MessageRenderer::render(&record())]);
        assert_eq!(transport.sent.lock().unwrap()[0].0, "http://hook");
        assert_eq!(
            state.last_sent_content(),
            Some(MessageRenderer::render(&record()).as_str())
        );
    }

    #[tokio::test]
    async fn test_only_consecutive_duplicates_are_suppressed() {
        let transport = RecordingTransport::default();
        let notifier = Notifier::new(transport.clone());
        let mut state = NotificationState::new();

        for body in ["A", "A", "B", "A"] {
            notifier
                .deliver(body.to_string(), "http://hook", &mut state)
                .await
                .unwrap();
        }

        assert_eq!(transport.bodies(), vec!["A", "B", "A"]);
    }

    #[tokio::test]
    async fn test_failed_delivery_leaves_state_untouched() {
        let transport = RecordingTransport::failing(1);
        let notifier = Notifier::new(transport.clone());
        let mut state = NotificationState::new();

        let err = notifier
            .deliver("A".to_string(), "http://hook", &mut state)
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::DeliveryFailed(_)));
        assert_eq!(state.last_sent_content(), None);

        // The same body is not treated as a duplicate once the transport recovers.
        let outcome = notifier
            .deliver("A".to_string(), "http://hook", &mut state)
            .await
            .unwrap();
        assert_eq!(outcome, NotifyOutcome::Delivered);
        assert_eq!(transport.bodies(), vec!["A"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_delivered() {
        let transport = RecordingTransport::failing(2);
        let notifier = Notifier::new(transport.clone()).with_retries(2);
        let mut state = NotificationState::new();

        let outcome = notifier
            .deliver("A".to_string(), "http://hook", &mut state)
            .await
            .unwrap();

        assert_eq!(outcome, NotifyOutcome::Delivered);
        assert_eq!(transport.bodies(), vec!["A"]);
        assert_eq!(state.last_sent_content(), Some("A"));
    }
}
