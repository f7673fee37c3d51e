use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root configuration container for the launcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Client executable overrides.
    #[serde(default)]
    pub client: ClientConfig,
    /// Consult the WinFsp service registry after this file (default: true).
    #[serde(default = "default_registry")]
    pub registry: bool,
    /// Per-service-class settings, keyed by class name (e.g. "sshfs.kr").
    #[serde(default)]
    pub services: HashMap<String, ServiceValues>,
}

/// Paths to the remote-filesystem client and its ssh transport.
///
/// Unset fields resolve next to the launcher executable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub sshfs: Option<String>,
    #[serde(default)]
    pub ssh: Option<String>,
}

/// Settings for one service class. `1` enables a setting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceValues {
    #[serde(default)]
    pub rootdir: Option<u32>,
    #[serde(default, rename = "Credentials")]
    pub credentials: Option<u32>,
}

fn default_registry() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            registry: default_registry(),
            services: HashMap::new(),
        }
    }
}
