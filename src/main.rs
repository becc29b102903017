use anyhow::Result;
use caddy_notifier::application::services::orchestrator::{Orchestrator, spawn_shutdown_listener};
use caddy_notifier::command::{Command, Subcommand};
use caddy_notifier::domain::ports::log_source::LogSource;
use caddy_notifier::domain::services::{
    message_renderer::MessageRenderer, record_parser::RecordParser,
};
use caddy_notifier::infrastructure::{docker::resolve_container_id, local_file_source::LocalFileSource};
use caddy_notifier::init_tracing;
use caddy_notifier::shared::app_config::AppConfig;
use clap::Parser;
use colored::{Color, Colorize};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let command = Command::parse();
    init_tracing(command.log_level);

    match command.subcommand.unwrap_or(Subcommand::Watch) {
        Subcommand::Watch => {
            let config = AppConfig::load(&command.config)?;
            info!("loaded config from {}", command.config);
            debug!("config: {:?}", config);
            let shutdown = spawn_shutdown_listener();
            Orchestrator::new(config).run(shutdown).await?;
        }
        Subcommand::Check => {
            let config = AppConfig::load(&command.config)?;
            println!(
                "{} config is valid",
                command.config.color(Color::Green)
            );
            println!("  container: {}", config.container_name);
            println!("  watching:  {}", config.log_dir);
            println!("  log file:  {}{}", config.working_dir, config.log_file);
            println!("  retries:   {}", config.delivery_retries);
            match resolve_container_id(&config.docker_bin, &config.container_name).await {
                Ok(id) => println!("  container id: {}", id.color(Color::Green)),
                Err(e) => {
                    println!("  container: {}", e.to_string().color(Color::Red));
                    return Err(e.into());
                }
            }
        }
        Subcommand::Render { file } => {
            let content = LocalFileSource::new(&file).fetch_content().await?;
            match RecordParser::parse(&content) {
                Ok(record) => println!("{}", MessageRenderer::render(&record)),
                Err(e) => {
                    println!("{} {}", file.color(Color::Red), e);
                    if let Some(line) = e.line() {
                        println!("  line: {}", line);
                    }
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}
