/// Memory of the last delivered message body.
///
/// Lives for the process lifetime and is never persisted. Only the notifier
/// writes it, and only after a confirmed delivery.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NotificationState {
    last_sent_content: Option<String>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_sent_content(&self) -> Option<&str> {
        self.last_sent_content.as_deref()
    }

    pub(crate) fn record_sent(&mut self, content: String) {
        self.last_sent_content = Some(content);
    }
}
