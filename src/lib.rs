//! Launcher that turns a UNC-style mount prefix into an sshfs command line
//! and replaces itself with the client.

pub mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod launch;
pub mod logging;
pub mod mount;
pub mod policy;

pub use error::LaunchError;
