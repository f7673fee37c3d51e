//! Argument assembler — the client's argument vector in one place.
//!
//! Order is fixed: executable, fixed flags, id mapping, authentication,
//! volume prefix, optional port, remote, mount target, then caller
//! pass-through options last.

use crate::error::LaunchError;
use crate::mount::{escape_bounded, OPTION_CAPACITY};

/// Exec capacity: 256 slots, one reserved for the terminator.
pub const MAX_ARGS: usize = 255;

/// Flags every mount carries, between the ssh command and id mapping.
const HOST_KEY_FLAGS: [&str; 2] = ["-oUserKnownHostsFile=/dev/null", "-oStrictHostKeyChecking=no"];

/// Builder for the argument vector passed to the remote-filesystem client.
#[derive(Debug, Clone)]
pub struct ArgAssembler {
    args: Vec<String>,
}

impl ArgAssembler {
    /// Start with the executable as `argv[0]`.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            args: vec![executable.into()],
        }
    }

    /// Foreground, relative symlinks, filesystem type name, ssh command,
    /// and host-key checking disabled.
    pub fn with_fixed_flags(mut self, ssh_command: &str) -> Self {
        self.args.push("-f".into());
        self.args.push("-orellinks".into());
        self.args.push("-ofstypename=SSHFS".into());
        self.args.push(ssh_command.into());
        self.args.extend(HOST_KEY_FLAGS.iter().map(|f| f.to_string()));
        self
    }

    /// Add a preformatted option (id mapping, authentication).
    pub fn with_option(mut self, option: String) -> Self {
        self.args.push(option);
        self
    }

    /// `--VolumePrefix=<raw specification>`.
    pub fn with_volume_prefix(mut self, raw_spec: &str) -> Self {
        self.args.push(format!("--VolumePrefix={}", raw_spec));
        self
    }

    /// `-oPort=<escaped port>` when a port was given.
    pub fn with_port(mut self, port: Option<&str>) -> Result<Self, LaunchError> {
        if let Some(port) = port {
            let escaped = escape_bounded(port, OPTION_CAPACITY)?;
            self.args.push(format!("-oPort={}", escaped));
        }
        Ok(self)
    }

    /// Add arbitrary arguments in order.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(extra.into_iter().map(Into::into));
        self
    }

    /// Build the final argument list, enforcing [`MAX_ARGS`].
    pub fn build(self) -> Result<Vec<String>, LaunchError> {
        if self.args.len() > MAX_ARGS {
            return Err(LaunchError::TooManyArguments {
                count: self.args.len(),
                max: MAX_ARGS,
            });
        }
        Ok(self.args)
    }
}
