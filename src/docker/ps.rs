// src/docker/ps.rs

use serde::Serialize;

use crate::errors::Result;
use crate::table::{parse_table, Record};

/// Header labels of `ps` output, in the order the tool prints them.
pub const PS_COLUMNS: [&str; 7] = [
    "CONTAINER ID",
    "IMAGE",
    "COMMAND",
    "CREATED",
    "STATUS",
    "PORTS",
    "NAMES",
];

/// One row of `ps` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerInfo {
    pub container_id: String,
    pub image: String,
    pub command: String,
    pub created: String,
    pub status: String,
    pub ports: String,
    pub names: Vec<String>,
}

impl ContainerInfo {
    /// True if `name` is one of this container's names.
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl From<&Record> for ContainerInfo {
    fn from(record: &Record) -> Self {
        let field = |name: &str| record.get(name).unwrap_or_default().to_string();
        Self {
            container_id: field("CONTAINER ID"),
            image: field("IMAGE"),
            command: field("COMMAND"),
            created: field("CREATED"),
            status: field("STATUS"),
            ports: field("PORTS"),
            names: record.last_values().to_vec(),
        }
    }
}

/// Parse the stdout of `ps` into containers.
pub fn parse_ps_output(stdout: &str) -> Result<Vec<ContainerInfo>> {
    let records = parse_table(stdout, &PS_COLUMNS)?;
    Ok(records.iter().map(ContainerInfo::from).collect())
}
