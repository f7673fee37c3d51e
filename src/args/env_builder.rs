//! Environment builder — the client's environment in one place.

use std::ffi::OsString;

/// Prepended to an inherited `PATH`.
const PATH_PREFIX: &str = "/usr/bin:";
/// Whole environment used when nothing sets `PATH`.
const DEFAULT_PATH: &str = "/bin";

/// Builder for environment variables passed to the client.
#[derive(Debug, Clone, Default)]
pub struct EnvSet {
    vars: Vec<(OsString, OsString)>,
}

impl EnvSet {
    /// Start from an inherited environment, e.g. `std::env::vars_os()`.
    pub fn inherit<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self {
            vars: vars.into_iter().collect(),
        }
    }

    /// Force a known search path.
    ///
    /// `PATH=<v>` becomes `PATH=/usr/bin:<v>`, everything else passes
    /// through. Without a `PATH` the environment collapses to `PATH=/bin`.
    pub fn with_normalized_path(self) -> Self {
        let has_path = self.vars.iter().any(|(k, _)| k.as_os_str() == "PATH");
        if !has_path {
            tracing::debug!("no PATH inherited, using minimal environment");
            return Self {
                vars: vec![(OsString::from("PATH"), OsString::from(DEFAULT_PATH))],
            };
        }

        let vars = self
            .vars
            .into_iter()
            .map(|(k, v)| {
                if k.as_os_str() == "PATH" {
                    let mut path = OsString::from(PATH_PREFIX);
                    path.push(&v);
                    (k, path)
                } else {
                    (k, v)
                }
            })
            .collect();
        Self { vars }
    }

    /// Build the final environment variable list.
    pub fn build(self) -> Vec<(OsString, OsString)> {
        self.vars
    }
}
