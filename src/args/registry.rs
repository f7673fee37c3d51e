//! Caller-option registry — options the launcher consumes itself.
//!
//! Everything not listed here is forwarded to the client untouched.

/// A single caller option definition.
#[derive(Debug, Clone)]
pub struct OptionDef {
    /// Option spelling, matched case-insensitively (e.g. "-user").
    pub name: &'static str,
    /// Placeholder for the option's value in usage text.
    pub value_name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

/// Option carrying the local user, `[DOMAIN/]USERNAME`.
pub const USER_OPTION: &str = "-user";
/// Option carrying the local home folder.
pub const HOME_OPTION: &str = "-home";

/// Build the caller-option registry.
pub fn option_registry() -> Vec<OptionDef> {
    vec![
        OptionDef {
            name: USER_OPTION,
            value_name: "[DOMAIN/]USERNAME",
            description: "Local user the mount runs as",
        },
        OptionDef {
            name: HOME_OPTION,
            value_name: "HOME",
            description: "Local user home folder",
        },
    ]
}

impl OptionDef {
    /// Check if this definition matches the given argument string.
    pub fn matches(&self, arg: &str) -> bool {
        arg.eq_ignore_ascii_case(self.name)
    }
}
