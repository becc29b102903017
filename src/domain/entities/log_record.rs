use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Summary of one access-log line. Built once by the parser and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub host: String,
    pub client_ip: String,
    pub user_agent: String,
    pub status_code: i64,
}

impl LogRecord {
    /// `YYYY-MM-DD HH:MM:SS`, always rendered in UTC.
    pub fn display_timestamp(&self) -> String {
        self.timestamp.format(DISPLAY_FORMAT).to_string()
    }
}

// Wire shape of a caddy JSON access-log line. Only the fields read here are modelled.
#[derive(Debug, Deserialize)]
pub(crate) struct RawLogLine {
    pub ts: f64,
    pub status: i64,
    #[serde(default)]
    pub request: RawRequest,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawRequest {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub headers: HashMap<String, Vec<String>>,
}

impl RawRequest {
    pub fn first_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
