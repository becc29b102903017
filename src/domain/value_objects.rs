pub mod config_format;
pub mod watch_target;
