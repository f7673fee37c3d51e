//! Pipeline — ties all argument processing stages together.

use std::ffi::OsString;

use crate::args::assembler::ArgAssembler;
use crate::args::classifier::classify;
use crate::args::env_builder::EnvSet;
use crate::args::registry::option_registry;
use crate::args::Mode;
use crate::error::LaunchError;
use crate::launch::{ClientInvocation, Installation};
use crate::mount::parse;
use crate::policy::PolicyResolver;

/// Most arguments `cmd` mode forwards.
pub const MAX_CMD_ARGS: usize = 200;

/// Build the client invocation for `mode`.
///
/// # Arguments
///
/// * `raw_args` - Arguments after the mode, caller options included
/// * `installation` - Client and ssh locations
/// * `resolver` - Per-class settings and identity lookup for `svc`
/// * `inherited_env` - Environment to normalise for the client
pub fn build_invocation<I>(
    mode: Mode,
    raw_args: &[String],
    installation: &Installation,
    resolver: &PolicyResolver<'_>,
    inherited_env: I,
) -> Result<ClientInvocation, LaunchError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    match mode {
        Mode::Cmd => build_cmd_invocation(raw_args, installation, inherited_env),
        Mode::Svc => build_svc_invocation(raw_args, installation, resolver, inherited_env),
    }
}

/// `cmd`: the client with the caller's arguments, unchanged.
pub fn build_cmd_invocation<I>(
    raw_args: &[String],
    installation: &Installation,
    inherited_env: I,
) -> Result<ClientInvocation, LaunchError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    // Stage 1: Strip caller options
    let classified = classify(raw_args, &option_registry())?;
    let passthrough = classified.passthrough();
    if passthrough.len() > MAX_CMD_ARGS {
        return Err(LaunchError::Usage(format!(
            "cmd accepts at most {} arguments, got {}",
            MAX_CMD_ARGS,
            passthrough.len()
        )));
    }

    // Stage 2: Assemble
    let argv = ArgAssembler::new(installation.client_arg())
        .with_extra(passthrough)
        .build()?;

    Ok(ClientInvocation {
        program: installation.client.clone(),
        argv,
        env: EnvSet::inherit(inherited_env).with_normalized_path().build(),
    })
}

/// `svc PREFIX MOUNT [options]`: the full mount pipeline.
pub fn build_svc_invocation<I>(
    raw_args: &[String],
    installation: &Installation,
    resolver: &PolicyResolver<'_>,
    inherited_env: I,
) -> Result<ClientInvocation, LaunchError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    // Stage 1: Strip caller options
    let classified = classify(raw_args, &option_registry())?;
    let ambient = classified.ambient_identity();
    let passthrough = classified.passthrough();
    let [prefix, mount_target, client_options @ ..] = passthrough.as_slice() else {
        return Err(LaunchError::Usage(
            "svc requires a PREFIX and a mount target".to_string(),
        ));
    };

    // Stage 2: Parse the mount specification
    let spec = parse(prefix)?;

    // Stage 3: Resolve policy
    let resolution = resolver.resolve(spec, &ambient);
    let remote = resolution.spec.remote();
    tracing::info!(remote = %remote, mount = %mount_target, "mounting");

    // Stage 4: Assemble arguments
    let argv = ArgAssembler::new(installation.client_arg())
        .with_fixed_flags(&installation.ssh_command_option())
        .with_option(resolution.id_mapping.to_option())
        .with_option(resolution.auth.to_option()?)
        .with_volume_prefix(resolution.spec.raw())
        .with_port(resolution.spec.port())?
        .with_extra([remote, mount_target.clone()])
        .with_extra(client_options.iter().cloned())
        .build()?;

    Ok(ClientInvocation {
        program: installation.client.clone(),
        argv,
        env: EnvSet::inherit(inherited_env).with_normalized_path().build(),
    })
}
