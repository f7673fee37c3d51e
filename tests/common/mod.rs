//! Shared test utilities: in-memory identity and settings fakes.

#![allow(dead_code, unused_imports)]

use sshfs_launcher::config::{FileStore, ServiceValues};
use sshfs_launcher::identity::{Account, IdentityLookup};
use sshfs_launcher::launch::Installation;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;

/// Identity lookup over a fixed account table.
#[derive(Default)]
pub struct FakeLookup {
    accounts: HashMap<String, Account>,
}

impl FakeLookup {
    pub fn with_account(mut self, query: &str, name: &str, uid: u32, gid: u32) -> Self {
        self.accounts.insert(
            query.to_string(),
            Account {
                name: name.to_string(),
                uid,
                gid,
            },
        );
        self
    }
}

impl IdentityLookup for FakeLookup {
    fn lookup(&self, name: &str) -> Option<Account> {
        self.accounts.get(name).cloned()
    }
}

/// Settings store with one entry per `(class, rootdir, credentials)`.
pub fn services(entries: &[(&str, Option<u32>, Option<u32>)]) -> FileStore {
    let map = entries
        .iter()
        .map(|(class, rootdir, credentials)| {
            (
                class.to_string(),
                ServiceValues {
                    rootdir: *rootdir,
                    credentials: *credentials,
                },
            )
        })
        .collect::<HashMap<_, _>>();
    FileStore::new(map)
}

/// Installation rooted at a fixed, fake directory.
pub fn installation() -> Installation {
    Installation::in_dir(Path::new("/opt/sshfs-win/bin"))
}

pub fn raw_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

pub fn env(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
    pairs
        .iter()
        .map(|(k, v)| (OsString::from(k), OsString::from(v)))
        .collect()
}
