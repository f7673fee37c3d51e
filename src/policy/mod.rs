//! Policy resolution: turns a parsed mount specification and the local
//! identity into the root, authentication and id-mapping choices.

mod auth;

use crate::config::{ServiceConfig, ServiceSetting};
use crate::identity::{AmbientIdentity, IdentityLookup, LocalIdentity};
use crate::mount::{MountSpecification, RootPolicy};

pub use auth::{select_identity_file, AuthenticationPlan};

/// Directory holding per-account profile folders.
pub const PROFILES_DIR: &str = "C:/Users";

/// Numeric owner mapping for files on the mounted volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdMapping {
    /// Map remote files to this local uid/gid.
    Mapped { uid: u32, gid: u32 },
    /// Leave ownership alone (`-1,-1`).
    Unmapped,
}

impl IdMapping {
    pub fn for_identity(identity: &LocalIdentity) -> Self {
        match (identity.uid(), identity.gid()) {
            (Some(uid), Some(gid)) => Self::Mapped { uid, gid },
            _ => Self::Unmapped,
        }
    }

    pub fn to_option(self) -> String {
        match self {
            Self::Mapped { uid, gid } => format!("-ouid={},gid={}", uid, gid),
            Self::Unmapped => "-ouid=-1,gid=-1".to_string(),
        }
    }
}

/// Everything the argument assembler needs from policy.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The specification with its class's root policy applied.
    pub spec: MountSpecification,
    pub identity: LocalIdentity,
    pub auth: AuthenticationPlan,
    pub id_mapping: IdMapping,
}

/// Applies per-class settings and local identity to a specification.
pub struct PolicyResolver<'a> {
    services: &'a dyn ServiceConfig,
    lookup: &'a dyn IdentityLookup,
}

impl<'a> PolicyResolver<'a> {
    pub fn new(services: &'a dyn ServiceConfig, lookup: &'a dyn IdentityLookup) -> Self {
        Self { services, lookup }
    }

    pub fn root_policy(&self, class: &str) -> RootPolicy {
        if self.services.is_set(class, ServiceSetting::RootDir) {
            RootPolicy::FilesystemRoot
        } else {
            RootPolicy::HomeRelative
        }
    }

    /// Password over stdio when the class asks for credentials, otherwise
    /// a key file from the account profile or the caller's home.
    pub fn authentication(
        &self,
        spec: &MountSpecification,
        identity: &LocalIdentity,
        ambient: &AmbientIdentity,
    ) -> AuthenticationPlan {
        if self
            .services
            .is_set(spec.service_class(), ServiceSetting::Credentials)
        {
            return AuthenticationPlan::PasswordOverStream;
        }
        let home = match &identity.account {
            Some(account) => format!("{}/{}", PROFILES_DIR, account.name),
            None => ambient.home.clone(),
        };
        if home.is_empty() {
            tracing::warn!("no local home directory known, key search starts at '/'");
        }
        AuthenticationPlan::IdentityFile(select_identity_file(&home, spec.remote_user()))
    }

    pub fn resolve(
        &self,
        spec: MountSpecification,
        ambient: &AmbientIdentity,
    ) -> Resolution {
        let root = self.root_policy(spec.service_class());
        let spec = spec.with_root_policy(root);
        let identity = LocalIdentity::resolve(&spec, ambient, self.lookup);
        let auth = self.authentication(&spec, &identity, ambient);
        let id_mapping = IdMapping::for_identity(&identity);

        tracing::debug!(
            class = %spec.service_class(),
            root = ?root,
            auth = ?auth,
            id_mapping = ?id_mapping,
            "policy resolved"
        );

        Resolution {
            spec,
            identity,
            auth,
            id_mapping,
        }
    }
}
