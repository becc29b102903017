use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::{
    domain::ports::log_source::LogSource,
    shared::{
        app_config::AppConfig,
        error::{FetchError, SetupError},
    },
};

async fn run_docker(docker_bin: &str, args: &[&str]) -> Result<String, FetchError> {
    debug!("executing: {} {:?}", docker_bin, args);
    let output = Command::new(docker_bin)
        .args(args)
        .output()
        .await
        .map_err(|source| FetchError::Spawn {
            program: docker_bin.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(FetchError::NonZeroExit {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Looks up the id of the running container called `name`.
pub async fn resolve_container_id(docker_bin: &str, name: &str) -> Result<String, SetupError> {
    let listing = run_docker(
        docker_bin,
        &["ps", "--no-trunc", "--format", "{{.ID}}\t{{.Names}}"],
    )
    .await?;

    let id = find_container_id(&listing, name)
        .ok_or_else(|| SetupError::ContainerNotFound(name.to_string()))?;
    info!(container = name, id, "resolved container");
    Ok(id.to_string())
}

/// Matches `name` against `docker ps` output, one `<id>\t<name>[,<name>]` per line.
pub fn find_container_id<'a>(listing: &'a str, name: &str) -> Option<&'a str> {
    let wanted = name.trim_start_matches('/');
    listing.lines().find_map(|line| {
        let (id, names) = line.split_once('\t')?;
        names
            .split(',')
            .any(|candidate| candidate.trim().trim_start_matches('/') == wanted)
            .then_some(id.trim())
    })
}

/// Reads the log by running `cat` inside the container.
#[derive(Debug, Clone)]
pub struct DockerExecSource {
    docker_bin: String,
    container_id: String,
    working_dir: String,
    log_file: String,
}

impl DockerExecSource {
    pub fn new(
        docker_bin: impl Into<String>,
        container_id: impl Into<String>,
        working_dir: impl Into<String>,
        log_file: impl Into<String>,
    ) -> Self {
        Self {
            docker_bin: docker_bin.into(),
            container_id: container_id.into(),
            working_dir: working_dir.into(),
            log_file: log_file.into(),
        }
    }

    pub fn from_config(config: &AppConfig, container_id: impl Into<String>) -> Self {
        Self::new(
            &config.docker_bin,
            container_id,
            &config.working_dir,
            &config.log_file,
        )
    }

    fn exec_args(&self) -> Vec<&str> {
        vec![
            "exec",
            "-w",
            self.working_dir.as_str(),
            self.container_id.as_str(),
            "cat",
            self.log_file.as_str(),
        ]
    }
}

#[async_trait]
impl LogSource for DockerExecSource {
    async fn fetch_content(&self) -> Result<String, FetchError> {
        run_docker(&self.docker_bin, &self.exec_args()).await
    }
}
