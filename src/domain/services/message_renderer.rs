use crate::domain::entities::log_record::LogRecord;

const FENCE: &str = "```";
const SEPARATOR: &str = "---------------------------------------- ";

pub struct MessageRenderer;

impl MessageRenderer {
    /// Fixed layout, fenced so chat clients show it monospaced.
    pub fn render(record: &LogRecord) -> String {
        format!(
            "{FENCE}{}\n{SEPARATOR}\n{}\n{}\n{}\n{}{FENCE}",
            record.display_timestamp(),
            record.host,
            record.client_ip,
            record.user_agent,
            record.status_code,
        )
    }
}
