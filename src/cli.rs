//! Top-level command line: `MODE ARGS...`.

use std::ffi::OsString;

use clap::Parser;

use crate::args::{option_registry, Mode};
use crate::error::LaunchError;

/// Fewest command-line tokens accepted, program name included.
pub const MIN_TOKENS: usize = 4;

/// Launcher command line.
///
/// Help and version flags are disabled so that every hyphenated token is
/// left for the caller-option classifier and the client.
#[derive(Debug, Parser)]
#[command(name = "sshfs-win", disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    #[arg(value_enum)]
    pub mode: Mode,

    /// Mode arguments, caller options included.
    #[arg(required = true, num_args = 2.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse a full command line (program name first).
    pub fn try_parse_args<I, T>(argv: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        if argv.len() < MIN_TOKENS {
            return Err(LaunchError::Usage("too few arguments".to_string()));
        }
        // Everything after the mode is positional, whatever it looks like.
        argv.insert(2, OsString::from("--"));
        Self::try_parse_from(argv).map_err(|e| {
            LaunchError::Usage(e.kind().as_str().unwrap_or("invalid arguments").to_string())
        })
    }
}

/// Usage text for both modes.
pub fn usage() -> String {
    let mut text = String::from(
        r"usage: sshfs-win cmd SSHFS_COMMAND_LINE
    SSHFS_COMMAND_LINE  command line to pass to sshfs

usage: sshfs-win svc PREFIX X: [-user [DOMAIN/]USERNAME] [-home HOME] [SSHFS_OPTIONS]
    PREFIX              Windows UNC prefix (single backslash separators)
                        \sshfs[.SUFFIX]\[[DOMAIN+]LOCUSER=]REMUSER@HOST[!PORT][\PATH]
                        sshfs: remote user home dir
                        sshfs.r: remote root dir
                        sshfs.k: remote user home dir with key authentication
                        sshfs.kr: remote root dir with key authentication
    DOMAIN+LOCUSER=     local user override (a literal + and =)
    REMUSER             remote user
    HOST                remote host
    PORT                remote port
    PATH                remote path (relative to remote home or root)
    X:                  mount target
    SSHFS_OPTIONS       additional options to pass to sshfs
",
    );
    for def in option_registry() {
        text.push_str(&format!(
            "    {:<19} {} ({})\n",
            def.name, def.description, def.value_name
        ));
    }
    text.push_str(
        "\n    Authentication keys are searched as HOME/.ssh/id_rsa.REMUSER, then HOME/.ssh/id_rsa\n",
    );
    text
}
