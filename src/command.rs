#[derive(Debug, clap::Parser)]
#[clap(version, about = "Forwards the newest container access-log entry to a chat webhook")]
pub struct Command {
    /// Path to the JSON, YAML or TOML configuration file
    #[clap(short, long, global = true, default_value = "config.json")]
    pub config: String,

    #[clap(long, global = true, default_value = "info")]
    pub log_level: tracing::Level,

    #[clap(subcommand)]
    pub subcommand: Option<Subcommand>,
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Subcommand {
    /// Watch the log and send notifications (default)
    #[clap(name = "watch")]
    Watch,

    /// Validate the configuration and resolve the container
    #[clap(name = "check")]
    Check,

    /// Print the notification the last record of a local log file would produce
    #[clap(name = "render")]
    Render { file: String },
}
