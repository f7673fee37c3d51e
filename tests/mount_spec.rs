//! Integration tests for mount-specification parsing and escaping.

use sshfs_launcher::mount::{escape, parse, unescape, RootPolicy};
use sshfs_launcher::LaunchError;

// =============================================================================
// REMOTE STRING
// =============================================================================

#[test]
fn remote_round_trips_home_relative() {
    for (raw, expected) in [
        ("\\sshfs\\bob@example.com\\data", "bob@example.com:data"),
        ("\\sshfs\\bob@example.com\\a\\b\\c", "bob@example.com:a/b/c"),
        ("\\sshfs\\bob@example.com", "bob@example.com:"),
        ("\\sshfs.k\\u@10.0.0.1\\x y", "u@10.0.0.1:x y"),
    ] {
        assert_eq!(parse(raw).unwrap().remote(), expected, "input {raw}");
    }
}

#[test]
fn remote_round_trips_filesystem_root() {
    for (raw, expected) in [
        ("\\sshfs.r\\bob@example.com\\data", "bob@example.com:/data"),
        ("\\sshfs.kr\\bob@example.com", "bob@example.com:/"),
    ] {
        let spec = parse(raw).unwrap().with_root_policy(RootPolicy::FilesystemRoot);
        assert_eq!(spec.remote(), expected, "input {raw}");
    }
}

// =============================================================================
// DELIMITERS
// =============================================================================

#[test]
fn delimiters_are_independent() {
    let cases: [(&str, Option<&str>, Option<&str>, &str, &str, Option<&str>); 8] = [
        ("bob@h", None, None, "bob", "h", None),
        ("bob@h!22", None, None, "bob", "h", Some("22")),
        ("c=bob@h", None, Some("c"), "bob", "h", None),
        ("d+c=bob@h!22", Some("d"), Some("c"), "bob", "h", Some("22")),
        ("d+bob@h", Some("d"), None, "bob", "h", None),
        ("bob@h+x", None, None, "bob", "h", None),
        ("bob@h=carol", None, None, "bob", "h", None),
        ("bob@h=carol!22", None, None, "bob", "h", Some("22")),
    ];
    for (instance, domain, over, user, host, port) in cases {
        let spec = parse(&format!("\\sshfs\\{instance}\\p")).unwrap();
        assert_eq!(spec.local_domain(), domain, "{instance}");
        assert_eq!(spec.local_user_override(), over, "{instance}");
        assert_eq!(spec.remote_user(), user, "{instance}");
        assert_eq!(spec.host(), host, "{instance}");
        assert_eq!(spec.port(), port, "{instance}");
        assert_eq!(spec.remote_path(), "p", "{instance}");
    }
}

#[test]
fn delimiters_after_path_separator_belong_to_path() {
    let spec = parse("\\sshfs\\bob@host\\odd@name!x+y=z").unwrap();
    assert_eq!(spec.host(), "host");
    assert_eq!(spec.port(), None);
    assert_eq!(spec.remote_path(), "odd@name!x+y=z");
}

#[test]
fn missing_fields_are_reported() {
    for raw in ["\\sshfs\\host", "\\sshfs\\@host", "\\sshfs\\bob@", "\\sshfs"] {
        assert!(
            matches!(parse(raw), Err(LaunchError::ParseIncomplete { .. })),
            "input {raw}"
        );
    }
}

// =============================================================================
// ESCAPING
// =============================================================================

#[test]
fn escape_prefixes_each_special_once() {
    let raw = "C:/Users/a,b\\c/.ssh/id_rsa";
    let escaped = escape(raw);
    assert_eq!(escaped, "C:/Users/a\\,b\\\\c/.ssh/id_rsa");
    assert_eq!(escaped.len(), raw.len() + 2);
    assert_eq!(unescape(&escaped), raw);
}

#[test]
fn escape_leaves_printable_text_alone() {
    let raw = "bob@example.com:/srv/data-01_x";
    assert_eq!(escape(raw), raw);
    assert_eq!(unescape(raw), raw);
}
