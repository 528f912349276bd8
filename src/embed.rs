//! Style blocks embedded in host templates
//!
//! Parsing runs host file → [`Assembler`] → [`StyleDocument`]:
//!
//! - [`matcher`] decides which tagged templates are style blocks
//! - [`extract`] joins a template's literal text, one placeholder per hole
//! - [`indent`] strips the host indentation and remembers what it stripped
//! - the dialect parses the normalized text
//! - [`correct`] moves every position back into host coordinates
//!
//! Printing is the inverse, in [`serialize`]: host text is copied, node text
//! is printed by the dialect with placeholders resolved and indentation put
//! back. An unmodified document prints back to the exact host source.

pub mod config;
pub mod correct;
pub mod diagnostics;
pub mod document;
pub mod extract;
pub mod indent;
pub mod matcher;
pub mod placeholder;
pub mod serialize;

pub use config::{BlockConfig, Offset, Offsets};
pub use correct::PositionCorrector;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, SkipReason, SkippedBlock};
pub use document::{Assembler, NormalizedBlock, StyleDocument};
pub use extract::ExtractionResult;
pub use indent::{BaseIndentations, IndentLine, Normalized};
pub use matcher::MatcherConfig;
pub use serialize::{
    escape, stringify_document, to_template_raw, write_document, CorrectedOverrides, HostSafeBuilder,
};
