use std::{fmt::Display, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigType {
    Yaml,
    Json,
    Toml,
}

impl ConfigType {
    /// Picks the format from the file extension, falling back to JSON.
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        ConfigType::from(ext.as_str())
    }
}

impl From<&str> for ConfigType {
    fn from(s: &str) -> Self {
        match s {
            "yaml" | "yml" => ConfigType::Yaml,
            "toml" => ConfigType::Toml,
            _ => ConfigType::Json,
        }
    }
}

impl Display for ConfigType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
