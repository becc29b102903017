use tracing_subscriber::fmt;

use crate::shared::error::ConfigError;

pub fn init_tracing(level: tracing::Level) {
    let subscriber = fmt::Subscriber::builder().with_max_level(level).finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed");
    }
}

pub fn read_file(path: &str) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
    Ok(content)
}
