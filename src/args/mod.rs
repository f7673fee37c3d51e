//! Argument handling pipeline.
//!
//! ```text
//! Raw args → Classify → Parse → Resolve policy → Assemble → ClientInvocation
//! ```
//!
//! Each stage is a pure function that can be unit-tested independently;
//! only the policy stage touches the filesystem and the passwd database.

mod assembler;
mod classifier;
mod env_builder;
mod pipeline;
mod registry;

use clap::ValueEnum;

pub use assembler::{ArgAssembler, MAX_ARGS};
pub use classifier::{classify, ClassifiedArg, ClassifyResult};
pub use env_builder::EnvSet;
pub use pipeline::{build_cmd_invocation, build_invocation, build_svc_invocation, MAX_CMD_ARGS};
pub use registry::{option_registry, OptionDef, HOME_OPTION, USER_OPTION};

/// What the launcher was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Forward a ready-made client command line.
    Cmd,
    /// Mount a UNC prefix as a WinFsp service instance.
    Svc,
}
