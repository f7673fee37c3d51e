//! Integration tests for the `svc` and `cmd` invocation pipelines.

mod common;

use common::{env, installation, raw_args, services, FakeLookup};
use sshfs_launcher::args::{build_cmd_invocation, build_invocation, build_svc_invocation, Mode, MAX_ARGS};
use sshfs_launcher::config::FileStore;
use sshfs_launcher::launch::ClientInvocation;
use sshfs_launcher::policy::PolicyResolver;
use sshfs_launcher::LaunchError;
use std::fs;

fn svc(args: &[&str], store: &FileStore, lookup: &FakeLookup) -> Result<ClientInvocation, LaunchError> {
    let resolver = PolicyResolver::new(store, lookup);
    build_svc_invocation(&raw_args(args), &installation(), &resolver, env(&[("PATH", "/bin")]))
}

// =============================================================================
// END TO END
// =============================================================================

#[test]
fn root_class_with_port_and_home() {
    let store = services(&[("sshfs.r", Some(1), None)]);
    let inv = svc(
        &["\\sshfs.r\\bob@example.com!2222\\data", "X:", "-home", "C:/Users/alice"],
        &store,
        &FakeLookup::default(),
    )
    .unwrap();

    let client = installation().client_arg();
    let ssh_command = installation().ssh_command_option();
    let expected = vec![
        client.as_str(),
        "-f",
        "-orellinks",
        "-ofstypename=SSHFS",
        ssh_command.as_str(),
        "-oUserKnownHostsFile=/dev/null",
        "-oStrictHostKeyChecking=no",
        "-ouid=-1,gid=-1",
        "-oPreferredAuthentications=publickey,IdentityFile=\"C:/Users/alice/.ssh/id_rsa\"",
        "--VolumePrefix=\\sshfs.r\\bob@example.com!2222\\data",
        "-oPort=2222",
        "bob@example.com:/data",
        "X:",
    ];
    assert_eq!(inv.argv, expected);
    assert_eq!(inv.program, installation().client);
    assert_eq!(inv.env, env(&[("PATH", "/usr/bin:/bin")]));
}

#[test]
fn passthrough_options_come_last_in_order() {
    let store = services(&[]);
    let inv = svc(
        &["\\sshfs\\bob@h", "Y:", "-ovolname=v", "-user", "alice", "-odebug", "extra"],
        &store,
        &FakeLookup::default(),
    )
    .unwrap();

    let n = inv.argv.len();
    assert_eq!(&inv.argv[n - 5..], &["bob@h:", "Y:", "-ovolname=v", "-odebug", "extra"]);
    assert!(!inv.argv.iter().any(|a| a == "-user" || a == "alice"));
}

#[test]
fn mapped_ids_and_profile_key_for_known_account() {
    let store = services(&[]);
    let lookup = FakeLookup::default().with_account("CORP/alice", "alice", 197609, 197121);
    let inv = svc(
        &["\\sshfs\\bob@h\\x", "X:", "-user", "CORP\\alice"],
        &store,
        &lookup,
    )
    .unwrap();

    assert!(inv.argv.contains(&"-ouid=197609,gid=197121".to_string()));
    assert!(inv.argv.contains(
        &"-oPreferredAuthentications=publickey,IdentityFile=\"C:/Users/alice/.ssh/id_rsa\"".to_string()
    ));
}

#[test]
fn credentials_class_uses_password_streams() {
    let store = services(&[("sshfs", None, Some(1))]);
    let inv = svc(&["\\sshfs\\bob@h", "X:"], &store, &FakeLookup::default()).unwrap();
    assert!(inv.argv.contains(&"-opassword_stdin,password_stdout".to_string()));
    assert!(!inv.argv.iter().any(|a| a.contains("IdentityFile")));
}

// =============================================================================
// PORT OPTION
// =============================================================================

#[test]
fn port_option_precedes_remote() {
    let store = services(&[]);
    let inv = svc(&["\\sshfs\\bob@h!2200\\p", "X:"], &store, &FakeLookup::default()).unwrap();

    let ports: Vec<_> = inv.argv.iter().filter(|a| a.starts_with("-oPort=")).collect();
    assert_eq!(ports, vec!["-oPort=2200"]);
    let port_at = inv.argv.iter().position(|a| a == "-oPort=2200").unwrap();
    let remote_at = inv.argv.iter().position(|a| a == "bob@h:p").unwrap();
    assert_eq!(port_at + 1, remote_at);
}

#[test]
fn no_port_option_without_bang() {
    let store = services(&[]);
    let inv = svc(&["\\sshfs\\bob@h\\p", "X:"], &store, &FakeLookup::default()).unwrap();
    assert!(!inv.argv.iter().any(|a| a.starts_with("-oPort=")));
}

// =============================================================================
// IDENTITY FILE
// =============================================================================

#[test]
fn identity_file_prefers_per_remote_user_key() {
    let home = tempfile::tempdir().unwrap();
    let ssh = home.path().join(".ssh");
    fs::create_dir_all(&ssh).unwrap();
    fs::write(ssh.join("id_rsa"), b"k").unwrap();
    fs::write(ssh.join("id_rsa.bob"), b"k").unwrap();
    let home_str = home.path().to_string_lossy().into_owned();

    let store = services(&[]);
    let bob = svc(&["\\sshfs\\bob@h", "X:", "-home", home_str.as_str()], &store, &FakeLookup::default()).unwrap();
    let carol = svc(&["\\sshfs\\carol@h", "X:", "-home", home_str.as_str()], &store, &FakeLookup::default()).unwrap();

    let bob_key = format!(
        "-oPreferredAuthentications=publickey,IdentityFile=\"{}/.ssh/id_rsa.bob\"",
        home_str
    );
    let default_key = format!(
        "-oPreferredAuthentications=publickey,IdentityFile=\"{}/.ssh/id_rsa\"",
        home_str
    );
    assert!(bob.argv.contains(&bob_key));
    assert!(carol.argv.contains(&default_key));
}

// =============================================================================
// LOCAL USER PRECEDENCE
// =============================================================================

#[test]
fn spec_override_beats_ambient_user() {
    let store = services(&[]);
    let lookup = FakeLookup::default()
        .with_account("alice/carol", "carol", 1001, 1001)
        .with_account("D/U", "U", 2002, 2002);
    let inv = svc(
        &["\\sshfs\\alice+carol=bob@host\\", "X:", "-user", "D/U"],
        &store,
        &lookup,
    )
    .unwrap();
    assert!(inv.argv.contains(&"-ouid=1001,gid=1001".to_string()));
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn incomplete_spec_is_an_error() {
    let store = services(&[]);
    let err = svc(&["\\sshfs\\myalias", "X:"], &store, &FakeLookup::default()).unwrap_err();
    assert!(matches!(err, LaunchError::ParseIncomplete { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn svc_without_mount_target_is_usage_error() {
    let store = services(&[]);
    let err = svc(&["\\sshfs\\bob@h", "-home", "x"], &store, &FakeLookup::default()).unwrap_err();
    assert!(matches!(err, LaunchError::Usage(_)));
}

#[test]
fn too_many_passthrough_options() {
    let store = services(&[]);
    let mut args = vec!["\\sshfs\\bob@h", "X:"];
    args.extend(std::iter::repeat("-odebug").take(MAX_ARGS));
    let err = svc(&args, &store, &FakeLookup::default()).unwrap_err();
    assert!(matches!(err, LaunchError::TooManyArguments { max, .. } if max == MAX_ARGS));
}

// =============================================================================
// CMD MODE
// =============================================================================

#[test]
fn cmd_prepends_client_and_strips_caller_options() {
    let inv = build_cmd_invocation(
        &raw_args(&["-o", "x", "-home", "C:\\h", "user@h:", "M:"]),
        &installation(),
        env(&[("HOME", "/h")]),
    )
    .unwrap();
    assert_eq!(inv.argv[0], installation().client_arg());
    assert_eq!(&inv.argv[1..], &["-o", "x", "user@h:", "M:"]);
    assert_eq!(inv.env, env(&[("PATH", "/bin")]));
}

#[test]
fn cmd_rejects_more_than_two_hundred_args() {
    let args: Vec<String> = (0..201).map(|i| format!("a{i}")).collect();
    let err = build_cmd_invocation(&args, &installation(), env(&[])).unwrap_err();
    assert!(matches!(err, LaunchError::Usage(_)));
}

#[test]
fn build_invocation_dispatches_on_mode() {
    let store = services(&[]);
    let lookup = FakeLookup::default();
    let resolver = PolicyResolver::new(&store, &lookup);
    let args = raw_args(&["\\sshfs\\bob@h", "X:"]);

    let cmd = build_invocation(Mode::Cmd, &args, &installation(), &resolver, env(&[])).unwrap();
    assert_eq!(cmd.argv.len(), 3);

    let svc = build_invocation(Mode::Svc, &args, &installation(), &resolver, env(&[])).unwrap();
    assert!(svc.argv.contains(&"bob@h:".to_string()));
}
