use chrono::DateTime;

use crate::{
    domain::entities::log_record::{LogRecord, RawLogLine},
    shared::error::ParseError,
};

pub const CLIENT_IP_HEADER: &str = "Cf-Connecting-Ip";
pub const USER_AGENT_HEADER: &str = "User-Agent";

// Framing bytes that leak from the container exec stream.
const CONTROL_BYTES: [char; 3] = ['\u{0}', '\u{1}', '\u{1e}'];

pub struct RecordParser;

impl RecordParser {
    /// Parses the last complete line of `raw_content`.
    ///
    /// The content is expected to end with a newline, so the final element of
    /// the split is the (usually empty) partial line and the record sits one
    /// before it.
    pub fn parse(raw_content: &str) -> Result<LogRecord, ParseError> {
        let line = Self::last_complete_line(raw_content)?;
        Self::parse_line(line)
    }

    pub fn last_complete_line(raw_content: &str) -> Result<&str, ParseError> {
        let lines: Vec<&str> = raw_content.split('\n').collect();
        if lines.len() < 2 {
            return Err(ParseError::NoRecords);
        }
        Ok(lines[lines.len() - 2])
    }

    pub fn sanitize(line: &str) -> String {
        line.chars().filter(|c| !CONTROL_BYTES.contains(c)).collect()
    }

    pub fn parse_line(line: &str) -> Result<LogRecord, ParseError> {
        let sanitized = Self::sanitize(line);

        let raw: RawLogLine =
            serde_json::from_str(&sanitized).map_err(|e| ParseError::Malformed {
                reason: e.to_string(),
                line: sanitized.clone(),
            })?;

        let missing = |field: &'static str| ParseError::MissingField {
            field,
            line: sanitized.clone(),
        };
        let client_ip = raw
            .request
            .first_header(CLIENT_IP_HEADER)
            .ok_or_else(|| missing(CLIENT_IP_HEADER))?
            .to_string();
        let user_agent = raw
            .request
            .first_header(USER_AGENT_HEADER)
            .ok_or_else(|| missing(USER_AGENT_HEADER))?
            .to_string();

        // `as` saturates, so out-of-range values surface through from_timestamp.
        let seconds = raw.ts.trunc() as i64;
        let timestamp =
            DateTime::from_timestamp(seconds, 0).ok_or_else(|| ParseError::Malformed {
                reason: format!("timestamp {} out of range", raw.ts),
                line: sanitized.clone(),
            })?;

        Ok(LogRecord {
            timestamp,
            method: raw.request.method,
            host: raw.request.host,
            client_ip,
            user_agent,
            status_code: raw.status,
        })
    }
}
