//! Docker Compose file format types.
//!
//! Serialization-oriented subset of the Compose specification: only the
//! fields the generated WordPress topology uses. Empty collections are
//! skipped so the emitted YAML stays close to a hand-written file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root structure of a docker-compose.yml file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeFile {
    /// Compose file format version (e.g., "3").
    pub version: String,

    /// Services to be created.
    pub services: BTreeMap<String, Service>,

    /// Named volumes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volumes: BTreeMap<String, VolumeDefinition>,

    /// Networks.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub networks: BTreeMap<String, NetworkDefinition>,
}

/// A service in a docker-compose file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Service {
    /// Container image to use.
    pub image: String,

    /// Explicit container name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,

    /// Restart policy (e.g., "always").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,

    /// Services this service depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Port mappings (e.g., ["8080:80"]).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,

    /// Environment variables.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,

    /// Volume mounts (e.g., ["./data:/data", "db:/var/lib/db"]).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,

    /// Networks to connect to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<String>,
}

/// Named volume definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolumeDefinition {
    /// Volume driver to use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}

/// Network definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkDefinition {
    /// Network driver to use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}
