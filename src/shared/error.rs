use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("config parse error ({format}): {reason}")]
    Parse { format: String, reason: String },
    #[error("missing required config key: {0}")]
    MissingField(&'static str),
}

/// Failure of the retrieval collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("command exited with code {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("content holds no complete record")]
    NoRecords,
    #[error("malformed record: {reason}")]
    Malformed { reason: String, line: String },
    #[error("record is missing field {field}")]
    MissingField { field: &'static str, line: String },
}

impl ParseError {
    pub fn line(&self) -> Option<&str> {
        match self {
            ParseError::NoRecords => None,
            ParseError::Malformed { line, .. } | ParseError::MissingField { line, .. } => {
                Some(line)
            }
        }
    }
}

/// Failure of the delivery transport.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("webhook responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    DeliveryFailed(#[from] SendError),
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot watch {path}: {source}")]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
    #[error("container with name {0} not found")]
    ContainerNotFound(String),
    #[error("cannot list containers: {0}")]
    ContainerLookup(#[from] FetchError),
}

/// Anything that drops a single change event. Never fatal to the watch loop.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
