use serde::Deserialize;

use crate::{
    domain::value_objects::config_format::ConfigType,
    shared::{error::ConfigError, utils::read_file},
};

pub const DEFAULT_LOG_FILE: &str = "access.log";
pub const DEFAULT_WORKING_DIR: &str = "/var/log/caddy/";
pub const DEFAULT_DOCKER_BIN: &str = "docker";

/// Startup configuration, read once and never reloaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub container_name: String,
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default)]
    pub log_dir: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_working_dir")]
    pub working_dir: String,
    #[serde(default = "default_docker_bin")]
    pub docker_bin: String,
    #[serde(default)]
    pub delivery_retries: u32,
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

fn default_working_dir() -> String {
    DEFAULT_WORKING_DIR.to_string()
}

fn default_docker_bin() -> String {
    DEFAULT_DOCKER_BIN.to_string()
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = read_file(path)?;
        Self::parse(&content, ConfigType::from_path(path))
    }

    pub fn parse(content: &str, config_type: ConfigType) -> Result<Self, ConfigError> {
        let parse_error = |reason: String| ConfigError::Parse {
            format: config_type.to_string(),
            reason,
        };
        let config: AppConfig = match config_type {
            ConfigType::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
            ConfigType::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
            ConfigType::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("containerName", &self.container_name),
            ("webhookUrl", &self.webhook_url),
            ("logDir", &self.log_dir),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(key));
            }
        }
        Ok(())
    }
}
