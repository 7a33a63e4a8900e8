// src/lib.rs

pub mod cli;
pub mod config;
pub mod docker;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod table;
pub mod types;

use anyhow::Result;
use tracing::{debug, warn};

use crate::cli::{CliArgs, Command};
use crate::config::load_or_default;
use crate::docker::{ContainerInfo, DockerClient, PsFilter, RunArguments};
use crate::exec::CancelToken;
use crate::types::OnProcessExit;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (plus CLI overrides)
/// - the client and its process invoker
/// - Ctrl-C handling for `wait-log`
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_or_default(args.config.as_deref())?;
    if let Some(exe) = args.docker.as_deref() {
        cfg.override_executable(exe)?;
    }
    debug!(executable = %cfg.executable, "configuration resolved");

    let client = DockerClient::from_config(&cfg);

    match args.command {
        Command::Ps { all, names, json } => {
            let filters: Vec<PsFilter> = names.into_iter().map(PsFilter::Name).collect();
            let containers = client.ps(all, &filters).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&containers)?);
            } else {
                print_containers(&containers);
            }
        }

        Command::Build { path } => match client.build(&path).await? {
            Some(id) => println!("{id}"),
            None => warn!(path = %path, "build succeeded but no image id was reported"),
        },

        Command::Pull { image, tag } => {
            client.pull_image(&image, tag.as_deref()).await?;
        }

        Command::Run {
            image,
            name,
            hostname,
            interactive,
            env,
            volumes,
            replace,
        } => {
            let run = RunArguments {
                image,
                interactive,
                name,
                hostname,
                env: env.into_iter().collect(),
                volumes,
            };
            let id = if replace {
                client.run_or_replace(&run).await?
            } else {
                client.run_image(&run).await?
            };
            println!("{id}");
        }

        Command::Start { name } => println!("{}", client.start_container(&name).await?),

        Command::Stop { name } => println!("{}", client.stop_container(&name).await?),

        Command::Rm { name, force_stop } => {
            if force_stop {
                client.stop_and_remove_container(&name).await?;
                println!("{name}");
            } else {
                println!("{}", client.remove_container(&name).await?);
            }
        }

        Command::WaitLog {
            name,
            marker,
            timeout,
            allow_stderr,
            fail_on_exit,
        } => {
            let mut options = cfg.log_watch;
            if let Some(timeout) = timeout {
                options.timeout = timeout;
            }
            if allow_stderr {
                options.break_on_error = false;
            }
            if fail_on_exit {
                options.on_exit = OnProcessExit::Fail;
            }

            // Ctrl-C → cancel the watch; the container itself is left alone.
            let cancel = CancelToken::new();
            {
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        eprintln!("failed to listen for Ctrl+C: {e}");
                        return;
                    }
                    cancel.cancel();
                });
            }

            let found = client.wait_for_log(&name, &marker, &options, &cancel).await?;
            println!("{}", found.line);
        }
    }

    Ok(())
}

/// Plain table output for `ps`.
///
/// A summary view: COMMAND and CREATED are left out to keep rows narrow.
/// `ps --json` carries every column.
fn print_containers(containers: &[ContainerInfo]) {
    println!(
        "{:<14}{:<24}{:<20}{:<24}{}",
        "CONTAINER ID", "IMAGE", "STATUS", "PORTS", "NAMES"
    );
    for c in containers {
        println!(
            "{:<14}{:<24}{:<20}{:<24}{}",
            c.container_id,
            c.image,
            c.status,
            c.ports,
            c.names.join(",")
        );
    }
}
