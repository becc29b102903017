pub mod discord_webhook;
pub mod docker;
pub mod local_file_source;
