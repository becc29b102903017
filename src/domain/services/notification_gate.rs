use crate::domain::entities::notification_state::NotificationState;

pub struct NotificationGate;

impl NotificationGate {
    /// False only when `candidate` equals the last delivered body.
    ///
    /// Two records rendering to the same text are indistinguishable here, so
    /// the second one is suppressed.
    pub fn should_send(candidate: &str, state: &NotificationState) -> bool {
        state.last_sent_content() != Some(candidate)
    }
}
