//! Mount specification handling.
//!
//! ```text
//! \service[.suffix]\[[domain+]locuser=]remuser@host[!port][\path]
//! ```

mod escape;
mod parser;

pub use escape::{escape, escape_bounded, unescape, OPTION_CAPACITY};
pub use parser::{parse, MountSpecification, RootPolicy};
