//! Mount-specification parser.
//!
//! Grammar (after mapping `\` to `/`):
//!
//! ```text
//! /class[.suffix]/[[domain+]locuser=]remuser@host[!port][/path]
//! ```
//!
//! The instance segment is scanned once, left to right. Each of the four
//! delimiters `+ = @ !` fires at most once and closes the open token into
//! its own field; a repeated delimiter is an ordinary character. Once `@`
//! has fired, the next delimiter closes the host instead, so a stray `+`
//! or `=` after the host cannot displace it.

use crate::error::LaunchError;

/// Where the remote path is rooted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootPolicy {
    /// Relative to the remote user's home directory.
    #[default]
    HomeRelative,
    /// Relative to the remote filesystem root.
    FilesystemRoot,
}

impl RootPolicy {
    /// Prefix placed between `host:` and the remote path.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::HomeRelative => "",
            Self::FilesystemRoot => "/",
        }
    }
}

/// Parsed mount specification. Built once by [`parse`], read-only after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpecification {
    raw: String,
    service_class: String,
    root_policy: RootPolicy,
    local_domain: Option<String>,
    local_user_override: Option<String>,
    remote_user: String,
    host: String,
    port: Option<String>,
    remote_path: String,
}

impl MountSpecification {
    /// The input string exactly as supplied (backslashes intact).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn service_class(&self) -> &str {
        &self.service_class
    }

    pub fn root_policy(&self) -> RootPolicy {
        self.root_policy
    }

    pub fn local_domain(&self) -> Option<&str> {
        self.local_domain.as_deref()
    }

    pub fn local_user_override(&self) -> Option<&str> {
        self.local_user_override.as_deref()
    }

    pub fn remote_user(&self) -> &str {
        &self.remote_user
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    /// Everything after the instance segment, separator-normalised.
    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    /// Copy of this specification under a resolved root policy.
    pub fn with_root_policy(mut self, root_policy: RootPolicy) -> Self {
        self.root_policy = root_policy;
        self
    }

    /// `remuser@host:<root><path>`, the client's remote argument.
    pub fn remote(&self) -> String {
        format!(
            "{}@{}:{}{}",
            self.remote_user,
            self.host,
            self.root_policy.prefix(),
            self.remote_path
        )
    }
}

/// Single-shot delimiters recognised inside the instance segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Domain,
    Override,
    User,
    Port,
}

impl Delimiter {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Domain),
            '=' => Some(Self::Override),
            '@' => Some(Self::User),
            '!' => Some(Self::Port),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Domain => 1,
            Self::Override => 2,
            Self::User => 4,
            Self::Port => 8,
        }
    }
}

/// Field that receives the token still open when the instance ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trailing {
    Unassigned,
    Host,
    Port,
}

#[derive(Debug, Default)]
struct Instance<'a> {
    local_domain: Option<&'a str>,
    local_user_override: Option<&'a str>,
    remote_user: &'a str,
    host: &'a str,
    port: Option<&'a str>,
}

fn scan_instance(instance: &str) -> Instance<'_> {
    let mut fields = Instance::default();
    let mut fired = 0u8;
    let mut start = 0;
    let mut trailing = Trailing::Unassigned;

    for (i, c) in instance.char_indices() {
        let Some(delim) = Delimiter::from_char(c) else {
            continue;
        };
        if fired & delim.bit() != 0 {
            continue;
        }
        fired |= delim.bit();

        let token = &instance[start..i];
        // The host opened by `@` ends at the next delimiter to fire.
        let host_open = trailing == Trailing::Host;
        if host_open {
            fields.host = token;
            trailing = Trailing::Unassigned;
        }
        match delim {
            Delimiter::Domain | Delimiter::Override if host_open => {}
            Delimiter::Domain => fields.local_domain = Some(token),
            Delimiter::Override => fields.local_user_override = Some(token),
            Delimiter::User => {
                fields.remote_user = token;
                trailing = Trailing::Host;
            }
            Delimiter::Port => {
                if fields.host.is_empty() {
                    fields.host = token;
                }
                trailing = Trailing::Port;
            }
        }
        start = i + c.len_utf8();
    }

    let token = &instance[start..];
    match trailing {
        Trailing::Host => fields.host = token,
        Trailing::Port => fields.port = Some(token),
        Trailing::Unassigned => {}
    }
    fields
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Split off the segment before the next `/`, returning it and whatever
/// follows that single separator.
fn split_segment(s: &str) -> (&str, &str) {
    match s.find('/') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (s, ""),
    }
}

/// Parse a mount specification such as `\sshfs.r\bob@example.com!2222\data`.
///
/// The returned specification is home-relative; the policy resolver
/// applies the service class's root policy.
pub fn parse(raw: &str) -> Result<MountSpecification, LaunchError> {
    let normalized = raw.replace('\\', "/");

    let rest = normalized.trim_start_matches('/');
    let (service_class, rest) = split_segment(rest);
    let rest = rest.trim_start_matches('/');
    let (instance, remote_path) = split_segment(rest);

    let fields = scan_instance(instance);

    let missing = if fields.remote_user.is_empty() {
        Some("remote user")
    } else if fields.host.is_empty() {
        Some("host")
    } else {
        None
    };
    if let Some(missing) = missing {
        return Err(LaunchError::ParseIncomplete {
            spec: raw.to_string(),
            missing,
        });
    }

    Ok(MountSpecification {
        raw: raw.to_string(),
        service_class: service_class.to_string(),
        root_policy: RootPolicy::default(),
        local_domain: non_empty(fields.local_domain),
        local_user_override: non_empty(fields.local_user_override),
        remote_user: fields.remote_user.to_string(),
        host: fields.host.to_string(),
        port: non_empty(fields.port),
        remote_path: remote_path.to_string(),
    })
}
