//! Authentication plan and identity-file search.

use std::path::Path;

use crate::error::LaunchError;
use crate::mount::{escape_bounded, OPTION_CAPACITY};

/// How the client authenticates to the remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationPlan {
    /// Password exchanged over the client's standard streams.
    PasswordOverStream,
    /// Public-key authentication with the given private-key file.
    IdentityFile(String),
}

impl AuthenticationPlan {
    /// Client option carrying this plan.
    pub fn to_option(&self) -> Result<String, LaunchError> {
        match self {
            Self::PasswordOverStream => Ok("-opassword_stdin,password_stdout".to_string()),
            Self::IdentityFile(path) => {
                let escaped = escape_bounded(path, OPTION_CAPACITY)?;
                Ok(format!(
                    "-oPreferredAuthentications=publickey,IdentityFile=\"{}\"",
                    escaped
                ))
            }
        }
    }
}

/// Pick the private key under `home`: `.ssh/id_rsa.<remote_user>` when it
/// exists, else `.ssh/id_rsa`. The fallback is returned whether or not it
/// exists; the client reports a missing key itself.
pub fn select_identity_file(home: &str, remote_user: &str) -> String {
    let per_user = format!("{}/.ssh/id_rsa.{}", home, remote_user);
    if Path::new(&per_user).exists() {
        return per_user;
    }
    tracing::debug!(candidate = %per_user, "per-user key not found, using default key");
    format!("{}/.ssh/id_rsa", home)
}
