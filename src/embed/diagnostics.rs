//! Blocks left out of a document, and why
//!
//! A style block that cannot be parsed never fails the document. It is
//! recorded here instead and its text stays part of the surrounding host
//! text, so the document still prints back byte-for-byte.

use crate::position::Range;
use crate::style::StyleParseError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum SkipReason {
    /// The dialect rejected the block; the error position is local to the block
    Parse(#[serde(serialize_with = "display")] StyleParseError),
    /// The template sits inside a hole of a block that was already extracted
    Nested,
}

fn display<S: serde::Serializer>(error: &StyleParseError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// A matched template that did not become a root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedBlock {
    /// Range of the template content in the host file
    pub range: Range,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub source: String,
}

impl Diagnostic {
    pub fn new(range: Range, severity: DiagnosticSeverity, message: String) -> Self {
        Self {
            range,
            severity,
            message,
            source: "tagstyle".to_string(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} at {}",
            self.severity, self.source, self.message, self.range.start
        )
    }
}

impl From<&SkippedBlock> for Diagnostic {
    fn from(skipped: &SkippedBlock) -> Self {
        match &skipped.reason {
            SkipReason::Parse(error) => Diagnostic::new(
                skipped.range.clone(),
                DiagnosticSeverity::Warning,
                format!("style block left as host text: {error}"),
            ),
            SkipReason::Nested => Diagnostic::new(
                skipped.range.clone(),
                DiagnosticSeverity::Information,
                "nested style block kept inside its enclosing block".to_string(),
            ),
        }
    }
}
