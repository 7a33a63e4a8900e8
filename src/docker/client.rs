// src/docker/client.rs

//! Typed façade over the container tool.

use tracing::{debug, info};

use crate::config::{ConfigFile, DEFAULT_EXECUTABLE};
use crate::docker::args::{self, PsFilter, RunArguments};
use crate::docker::build::extract_built_image_id;
use crate::docker::ps::{parse_ps_output, ContainerInfo};
use crate::errors::Result;
use crate::exec::{
    CancelToken, CommandRunner, CommandSpec, ExecutionResult, LogMatch, ProcessInvoker,
    WatchOptions,
};

/// Builds argument vectors, hands them to a [`CommandRunner`] and interprets
/// the output.
///
/// Every method performs its commands exactly once; retrying is up to the
/// caller.
#[derive(Debug, Clone)]
pub struct DockerClient<R = ProcessInvoker> {
    runner: R,
    executable: String,
}

impl DockerClient<ProcessInvoker> {
    /// Client for `docker` on `PATH`.
    pub fn new() -> Self {
        Self::with_runner(ProcessInvoker::new(), DEFAULT_EXECUTABLE)
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::with_runner(ProcessInvoker::new(), cfg.executable.clone())
    }
}

impl Default for DockerClient<ProcessInvoker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> DockerClient<R> {
    pub fn with_runner(runner: R, executable: impl Into<String>) -> Self {
        Self {
            runner,
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn spec(&self, args: Vec<String>) -> CommandSpec {
        CommandSpec::new(self.executable.clone()).args(args)
    }

    async fn run(&self, args: Vec<String>) -> Result<ExecutionResult> {
        let spec = self.spec(args);
        self.runner.run(&spec).await
    }

    /// Build the context at `path`; returns the image id when the output
    /// announces one.
    pub async fn build(&self, path: &str) -> Result<Option<String>> {
        let result = self.run(args::build_args(path)).await?;
        let id = extract_built_image_id(&result.stdout);
        if id.is_none() {
            debug!(path = %path, "build output did not announce an image id");
        }
        Ok(id)
    }

    /// Start a new detached container; returns its id.
    pub async fn run_image(&self, run: &RunArguments) -> Result<String> {
        let result = self.run(run.to_args()).await?;
        let id = result.stdout.trim().to_string();
        info!(image = %run.image, name = ?run.name, id = %id, "container started");
        Ok(id)
    }

    pub async fn pull_image(&self, image: &str, tag: Option<&str>) -> Result<()> {
        self.run(args::pull_args(image, tag)).await?;
        Ok(())
    }

    /// Returns the tool's echo of the container name.
    pub async fn start_container(&self, name: &str) -> Result<String> {
        self.container_command("start", name).await
    }

    pub async fn stop_container(&self, name: &str) -> Result<String> {
        self.container_command("stop", name).await
    }

    pub async fn remove_container(&self, name: &str) -> Result<String> {
        self.container_command("rm", name).await
    }

    async fn container_command(&self, verb: &str, name: &str) -> Result<String> {
        let result = self.run(args::container_args(verb, name)).await?;
        Ok(result.stdout.trim().to_string())
    }

    /// List containers (`all` includes stopped ones).
    pub async fn ps(&self, all: bool, filters: &[PsFilter]) -> Result<Vec<ContainerInfo>> {
        let result = self.run(args::ps_args(all, filters)).await?;
        let containers = parse_ps_output(&result.stdout)?;
        debug!(count = containers.len(), "parsed ps output");
        Ok(containers)
    }

    /// The container named exactly `name`, running or not.
    ///
    /// The tool's name filter matches substrings, so results are narrowed to
    /// exact name matches here.
    pub async fn find_container(&self, name: &str) -> Result<Option<ContainerInfo>> {
        let containers = self
            .ps(true, &[PsFilter::Name(name.to_string())])
            .await?;
        Ok(containers.into_iter().find(|c| c.has_name(name)))
    }

    pub async fn stop_and_remove_container(&self, name: &str) -> Result<()> {
        self.stop_container(name).await?;
        self.remove_container(name).await?;
        Ok(())
    }

    /// Run `run`, first stopping and removing any container that already has
    /// its name. Without a name this is plain [`run_image`](Self::run_image).
    pub async fn run_or_replace(&self, run: &RunArguments) -> Result<String> {
        if let Some(name) = &run.name {
            if self.find_container(name).await?.is_some() {
                info!(name = %name, "replacing existing container");
                self.stop_and_remove_container(name).await?;
            }
        }
        self.run_image(run).await
    }

    /// Follow `container`'s logs until a line contains `marker`.
    pub async fn wait_for_log(
        &self,
        container: &str,
        marker: &str,
        options: &WatchOptions,
        cancel: &CancelToken,
    ) -> Result<LogMatch> {
        let spec = self.spec(args::logs_follow_args(container));
        self.runner.watch(&spec, marker, options, cancel).await
    }
}
