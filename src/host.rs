//! Host-program capability
//!
//! The embedding engine never understands JavaScript or TypeScript beyond one
//! question: where are the tagged templates, and what do their tags look like?
//! [`HostParser`] is that capability. [`TemplateScanner`] is the built-in
//! implementation, a lexical scanner that tolerates type annotations, JSX,
//! optional chaining and the rest of modern syntax because it only tracks
//! brackets, template literals and tag chains.

pub mod scanner;
pub mod template;
pub mod tokens;

pub use scanner::TemplateScanner;
pub use template::{HostModule, Quasi, TagExpr, TaggedTemplate, TemplateExpression};

use crate::position::Position;
use std::fmt;

/// Failure to read the host file at all
///
/// This is the only loud failure of the whole pipeline: without the template
/// structure nothing can be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostParseError {
    /// A template literal opened at `position` never closes
    UnterminatedTemplate { offset: usize, position: Position },
}

impl fmt::Display for HostParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostParseError::UnterminatedTemplate { position, .. } => {
                write!(f, "Unterminated template literal starting at {position}")
            }
        }
    }
}

impl std::error::Error for HostParseError {}

/// Produces the tagged templates of a host source file
pub trait HostParser {
    fn parse_module(&self, source: &str) -> Result<HostModule, HostParseError>;
}
