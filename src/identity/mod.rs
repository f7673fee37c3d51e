//! Local identity: who the mount runs as on this machine.
//!
//! The caller supplies an [`AmbientIdentity`] (from `-user`/`-home`). A
//! mount specification may override the local user with `domain+user=`.
//! The resulting account name is looked up through [`IdentityLookup`];
//! an unknown account is a normal outcome, not an error.

mod passwd;

use crate::mount::MountSpecification;

pub use passwd::PasswdLookup;

/// A known local account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Canonical account name as reported by the lookup.
    pub name: String,
    pub uid: u32,
    pub gid: u32,
}

/// Maps a local account name to its numeric ids.
pub trait IdentityLookup {
    fn lookup(&self, name: &str) -> Option<Account>;
}

/// Identity the caller runs under, before any per-mount override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientIdentity {
    pub domain: Option<String>,
    pub user: String,
    /// Home or profile directory, forward-slash separated. May be empty.
    pub home: String,
}

impl AmbientIdentity {
    /// Build from the raw `-user` and `-home` option values.
    ///
    /// `-user` is `[DOMAIN/]USERNAME`; `\` is accepted as the domain
    /// separator when the value contains no `/`.
    pub fn from_options(user: Option<&str>, home: Option<&str>) -> Self {
        let (domain, user) = match user {
            Some(value) => split_domain(value),
            None => (None, String::new()),
        };
        Self {
            domain,
            user,
            home: home.map(|h| h.replace('\\', "/")).unwrap_or_default(),
        }
    }
}

fn split_domain(value: &str) -> (Option<String>, String) {
    let split = value.split_once('/').or_else(|| value.split_once('\\'));
    match split {
        Some((domain, user)) => (Some(domain.to_string()), user.to_string()),
        None => (None, value.to_string()),
    }
}

/// Resolved local-account context for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIdentity {
    pub domain: Option<String>,
    /// Username without domain.
    pub username: String,
    /// Matched account, if the lookup succeeded.
    pub account: Option<Account>,
}

impl LocalIdentity {
    /// Resolve the local user for `spec`.
    ///
    /// A `domain+user=` override in the specification wins over the
    /// ambient identity. The domain-qualified name is looked up first,
    /// then the bare username.
    pub fn resolve(
        spec: &MountSpecification,
        ambient: &AmbientIdentity,
        lookup: &dyn IdentityLookup,
    ) -> Self {
        let (domain, username) = match spec.local_user_override() {
            Some(user) => (spec.local_domain().map(str::to_string), user.to_string()),
            None => (
                ambient.domain.clone().filter(|d| !d.is_empty()),
                ambient.user.clone(),
            ),
        };

        let mut identity = Self {
            domain,
            username,
            account: None,
        };

        let qualified = identity.qualified_name();
        identity.account = lookup.lookup(&qualified).or_else(|| {
            if identity.username.is_empty() || qualified == identity.username {
                None
            } else {
                lookup.lookup(&identity.username)
            }
        });

        match &identity.account {
            Some(account) => tracing::debug!(
                user = %qualified,
                uid = account.uid,
                gid = account.gid,
                "local account resolved"
            ),
            None => tracing::debug!(user = %qualified, "local account unknown, ids not remapped"),
        }
        identity
    }

    /// `domain/user`, or just `user` without a domain.
    pub fn qualified_name(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{}/{}", domain, self.username),
            None => self.username.clone(),
        }
    }

    pub fn uid(&self) -> Option<u32> {
        self.account.as_ref().map(|a| a.uid)
    }

    pub fn gid(&self) -> Option<u32> {
        self.account.as_ref().map(|a| a.gid)
    }
}
