// src/docker/args.rs

//! Argument vectors for each supported subcommand.
//!
//! Every value is its own argv entry; nothing is shell-quoted or joined.

use std::collections::BTreeMap;
use std::fmt;

/// Tag used by `pull` when none is given.
pub const DEFAULT_TAG: &str = "latest";

/// Options for `run`. The container is always started detached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArguments {
    pub image: String,
    pub interactive: bool,
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub env: BTreeMap<String, String>,
    pub volumes: Vec<String>,
}

impl RunArguments {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn volume(mut self, volume: impl Into<String>) -> Self {
        self.volumes.push(volume.into());
        self
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["run".to_string()];
        args.push(if self.interactive { "-di" } else { "-d" }.to_string());

        if let Some(name) = &self.name {
            args.push("--name".to_string());
            args.push(name.clone());
        }
        if let Some(hostname) = &self.hostname {
            args.push("--hostname".to_string());
            args.push(hostname.clone());
        }
        for (key, value) in &self.env {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }
        for volume in &self.volumes {
            args.push("-v".to_string());
            args.push(volume.clone());
        }

        args.push(self.image.clone());
        args
    }
}

/// A `ps --filter` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PsFilter {
    /// `name=<value>`; the tool matches this as a substring.
    Name(String),
    /// Any other `key=value` filter the tool understands.
    Custom { key: String, value: String },
}

impl fmt::Display for PsFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PsFilter::Name(name) => write!(f, "name={name}"),
            PsFilter::Custom { key, value } => write!(f, "{key}={value}"),
        }
    }
}

pub fn build_args(path: &str) -> Vec<String> {
    vec!["build".to_string(), path.to_string()]
}

pub fn pull_args(image: &str, tag: Option<&str>) -> Vec<String> {
    vec![
        "pull".to_string(),
        format!("{image}:{}", tag.unwrap_or(DEFAULT_TAG)),
    ]
}

/// `<verb> <container>` for `start`, `stop` and `rm`.
pub fn container_args(verb: &str, container: &str) -> Vec<String> {
    vec![verb.to_string(), container.to_string()]
}

pub fn ps_args(all: bool, filters: &[PsFilter]) -> Vec<String> {
    let mut args = vec!["ps".to_string()];
    if all {
        args.push("-a".to_string());
    }
    for filter in filters {
        args.push("--filter".to_string());
        args.push(filter.to_string());
    }
    args
}

/// Follow a container's log output.
pub fn logs_follow_args(container: &str) -> Vec<String> {
    vec!["logs".to_string(), "-f".to_string(), container.to_string()]
}
