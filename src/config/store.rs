//! Per-service-class settings.
//!
//! A service class (`sshfs`, `sshfs.r`, `sshfs.k`, ...) names a profile
//! whose settings are small integers. A lookup yields `None` when the
//! setting is absent or unreadable; callers treat only `Some(1)` as set.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::types::{Config, ServiceValues};

/// Where WinFsp registers its service classes, as exposed by the
/// POSIX layer's registry filesystem.
pub const REGISTRY_ROOT: &str = "/proc/registry32/HKEY_LOCAL_MACHINE/Software/WinFsp/Services";

/// Settings the launcher reads from a service class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceSetting {
    /// `1`: remote paths are rooted at `/` rather than the remote home.
    RootDir,
    /// `1`: the client reads a password from its standard streams.
    Credentials,
}

impl ServiceSetting {
    /// Stable setting name used as registry value name and TOML key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RootDir => "rootdir",
            Self::Credentials => "Credentials",
        }
    }
}

/// Lookup of a setting by service class.
pub trait ServiceConfig {
    /// Raw setting value, or `None` when not found.
    fn get(&self, class: &str, setting: ServiceSetting) -> Option<u32>;

    /// Whether the setting holds the enabling value `1`.
    fn is_set(&self, class: &str, setting: ServiceSetting) -> bool {
        self.get(class, setting) == Some(1)
    }
}

/// Reads 32-bit values from the registry filesystem.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    root: PathBuf,
}

impl RegistryStore {
    /// Store rooted at [`REGISTRY_ROOT`].
    pub fn new() -> Self {
        Self::with_root(REGISTRY_ROOT)
    }

    /// Store rooted at an arbitrary directory laid out as
    /// `<root>/<class>/<setting>`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_value(path: &Path) -> std::io::Result<u32> {
        let mut buf = [0u8; 4];
        File::open(path)?.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }
}

impl Default for RegistryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceConfig for RegistryStore {
    fn get(&self, class: &str, setting: ServiceSetting) -> Option<u32> {
        if class.is_empty() || class == "." || class == ".." {
            return None;
        }
        let path = self.root.join(class).join(setting.as_str());
        match Self::read_value(&path) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "registry value not found");
                None
            }
        }
    }
}

/// Settings taken from the `[services]` tables of the launcher config.
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    services: HashMap<String, ServiceValues>,
}

impl FileStore {
    pub fn new(services: HashMap<String, ServiceValues>) -> Self {
        Self { services }
    }
}

impl ServiceConfig for FileStore {
    fn get(&self, class: &str, setting: ServiceSetting) -> Option<u32> {
        let values = self.services.get(class)?;
        match setting {
            ServiceSetting::RootDir => values.rootdir,
            ServiceSetting::Credentials => values.credentials,
        }
    }
}

/// Consults each layer in order; the first value found wins.
#[derive(Default)]
pub struct LayeredStore {
    layers: Vec<Box<dyn ServiceConfig>>,
}

impl LayeredStore {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append a lower-priority layer.
    pub fn with_layer(mut self, layer: impl ServiceConfig + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Config file first, then the registry unless disabled.
    pub fn from_config(config: &Config) -> Self {
        let store = Self::new().with_layer(FileStore::new(config.services.clone()));
        if config.registry {
            store.with_layer(RegistryStore::new())
        } else {
            store
        }
    }
}

impl ServiceConfig for LayeredStore {
    fn get(&self, class: &str, setting: ServiceSetting) -> Option<u32> {
        self.layers.iter().find_map(|layer| layer.get(class, setting))
    }
}
