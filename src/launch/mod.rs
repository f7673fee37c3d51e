//! Client discovery and process replacement.

use std::env::consts::EXE_SUFFIX;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::ClientConfig;
use crate::error::LaunchError;

/// Locations of the remote-filesystem client and its ssh transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    pub client: PathBuf,
    pub ssh: PathBuf,
}

impl Installation {
    /// Stock executable names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            client: dir.join(format!("sshfs{}", EXE_SUFFIX)),
            ssh: dir.join(format!("ssh{}", EXE_SUFFIX)),
        }
    }

    /// Executables next to the running launcher, with config overrides.
    pub fn discover(overrides: &ClientConfig) -> Result<Self, LaunchError> {
        let exe = std::env::current_exe().map_err(LaunchError::InstallDir)?;
        let dir = exe.parent().ok_or_else(|| {
            LaunchError::InstallDir(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("'{}' has no parent directory", exe.display()),
            ))
        })?;
        Ok(Self::in_dir(dir).with_overrides(overrides))
    }

    /// Replace any path the config sets explicitly.
    pub fn with_overrides(mut self, overrides: &ClientConfig) -> Self {
        if let Some(client) = &overrides.sshfs {
            self.client = PathBuf::from(client);
        }
        if let Some(ssh) = &overrides.ssh {
            self.ssh = PathBuf::from(ssh);
        }
        self
    }

    /// Client path as it appears in `argv[0]`.
    pub fn client_arg(&self) -> String {
        self.client.to_string_lossy().into_owned()
    }

    /// `-ossh_command=<absolute ssh path>`.
    pub fn ssh_command_option(&self) -> String {
        format!("-ossh_command={}", self.ssh.display())
    }
}

/// Everything needed to replace this process with the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInvocation {
    pub program: PathBuf,
    /// Full argument vector; `argv[0]` is the client path.
    pub argv: Vec<String>,
    pub env: Vec<(OsString, OsString)>,
}

/// Replace the current process with the client.
///
/// Returns only on failure. Where the platform cannot replace a process
/// image, the client runs as a child and its exit status becomes ours.
pub fn launch(invocation: ClientInvocation) -> LaunchError {
    tracing::debug!(program = %invocation.program.display(), argv = ?invocation.argv, "launching client");

    let mut command = Command::new(&invocation.program);
    command
        .args(invocation.argv.iter().skip(1))
        .env_clear()
        .envs(invocation.env.iter().map(|(k, v)| (k, v)));

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        if let Some(argv0) = invocation.argv.first() {
            command.arg0(argv0);
        }
        let source = command.exec();
        LaunchError::Exec {
            path: invocation.program,
            source,
        }
    }

    #[cfg(not(unix))]
    {
        match command.status() {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(source) => LaunchError::Exec {
                path: invocation.program,
                source,
            },
        }
    }
}
