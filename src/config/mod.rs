//! Launcher configuration and the per-service-class settings store.

mod loader;
mod store;
mod types;

pub use loader::{ConfigError, CONFIG_ENV};
pub use store::{
    FileStore, LayeredStore, RegistryStore, ServiceConfig, ServiceSetting, REGISTRY_ROOT,
};
pub use types::{ClientConfig, Config, ServiceValues};
