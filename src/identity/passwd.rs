//! Account lookup through the system passwd database.

use std::ffi::{CStr, CString};

use super::{Account, IdentityLookup};

/// [`IdentityLookup`] backed by `getpwnam(3)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswdLookup;

impl IdentityLookup for PasswdLookup {
    fn lookup(&self, name: &str) -> Option<Account> {
        if name.is_empty() {
            return None;
        }
        let c_name = CString::new(name).ok()?;

        // SAFETY: `c_name` is a valid NUL-terminated string. The returned
        // record lives in static storage owned by libc and is copied out
        // before any other passwd call can overwrite it.
        unsafe {
            let entry = libc::getpwnam(c_name.as_ptr());
            if entry.is_null() {
                return None;
            }
            let entry = &*entry;
            let account_name = if entry.pw_name.is_null() {
                name.to_string()
            } else {
                CStr::from_ptr(entry.pw_name).to_string_lossy().into_owned()
            };
            Some(Account {
                name: account_name,
                uid: entry.pw_uid,
                gid: entry.pw_gid,
            })
        }
    }
}
