// src/docker/mod.rs

//! Container tool commands: argument vectors, output interpretation and the
//! [`DockerClient`] that ties them to a [`CommandRunner`](crate::exec::CommandRunner).

pub mod args;
pub mod build;
pub mod client;
pub mod ps;

pub use args::{PsFilter, RunArguments, DEFAULT_TAG};
pub use build::extract_built_image_id;
pub use client::DockerClient;
pub use ps::{parse_ps_output, ContainerInfo, PS_COLUMNS};
