//! Argument classifier — raw args → caller options and pass-through args.

use crate::args::registry::{OptionDef, HOME_OPTION, USER_OPTION};
use crate::error::LaunchError;
use crate::identity::AmbientIdentity;

/// A classified argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedArg {
    /// Caller option with its value, consumed by the launcher.
    CallerOption {
        name: &'static str, // canonical spelling
        value: String,
    },
    /// Anything else, forwarded in original order.
    Passthrough(String),
}

/// Result of classifying raw arguments.
#[derive(Debug, Clone)]
pub struct ClassifyResult {
    /// Classified arguments in order.
    pub args: Vec<ClassifiedArg>,
}

impl ClassifyResult {
    /// Last value given for caller option `name`.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.args.iter().rev().find_map(|a| match a {
            ClassifiedArg::CallerOption { name: n, value } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Arguments left after caller options are stripped.
    pub fn passthrough(&self) -> Vec<String> {
        self.args
            .iter()
            .filter_map(|a| match a {
                ClassifiedArg::Passthrough(s) => Some(s.clone()),
                ClassifiedArg::CallerOption { .. } => None,
            })
            .collect()
    }

    /// Ambient identity from `-user` / `-home`.
    pub fn ambient_identity(&self) -> AmbientIdentity {
        AmbientIdentity::from_options(self.option(USER_OPTION), self.option(HOME_OPTION))
    }
}

/// Classify raw args against the registry.
///
/// A caller option always consumes the next argument as its value, even
/// one that starts with `-`.
pub fn classify(raw_args: &[String], registry: &[OptionDef]) -> Result<ClassifyResult, LaunchError> {
    let mut args = Vec::new();
    let mut iter = raw_args.iter();

    while let Some(arg) = iter.next() {
        match registry.iter().find(|d| d.matches(arg)) {
            Some(def) => {
                let value = iter.next().ok_or_else(|| {
                    LaunchError::Usage(format!("{}: missing required value", def.name))
                })?;
                args.push(ClassifiedArg::CallerOption {
                    name: def.name,
                    value: value.clone(),
                });
            }
            None => args.push(ClassifiedArg::Passthrough(arg.clone())),
        }
    }

    Ok(ClassifyResult { args })
}
