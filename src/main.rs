use std::process::ExitCode;

use sshfs_launcher::args::build_invocation;
use sshfs_launcher::cli::{usage, Cli};
use sshfs_launcher::config::{Config, LayeredStore};
use sshfs_launcher::identity::PasswdLookup;
use sshfs_launcher::launch::{launch, Installation};
use sshfs_launcher::logging::init_tracing;
use sshfs_launcher::policy::PolicyResolver;
use sshfs_launcher::LaunchError;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(_) => {
            eprint!("{}", usage());
            return ExitCode::from(2);
        }
    };

    init_tracing();

    let err = match run(cli) {
        Ok(never) => match never {},
        Err(err) => err,
    };

    eprintln!("Error: {:#}", err);
    let launch_error = err.downcast_ref::<LaunchError>();
    if matches!(launch_error, Some(LaunchError::Usage(_))) {
        eprint!("{}", usage());
    }
    let code = launch_error.map_or(1, LaunchError::exit_code);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

/// Returns only on failure; success replaces the process.
fn run(cli: Cli) -> anyhow::Result<std::convert::Infallible> {
    let config = Config::load().map_err(LaunchError::from)?;
    let installation = Installation::discover(&config.client)?;
    let services = LayeredStore::from_config(&config);
    let lookup = PasswdLookup;
    let resolver = PolicyResolver::new(&services, &lookup);

    let invocation = build_invocation(
        cli.mode,
        &cli.args,
        &installation,
        &resolver,
        std::env::vars_os(),
    )?;

    Err(launch(invocation).into())
}
