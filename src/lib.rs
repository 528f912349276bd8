//! # tagstyle
//!
//! Lossless parsing of style sheets embedded in tagged template literals,
//! the way styled-components writes them:
//!
//! ```text
//! const Button = styled.button`
//!   color: ${props => props.color};
//!   padding: 4px;
//! `;
//! ```
//!
//! Every block becomes a style-sheet tree whose positions point into the
//! host file, and the tree prints back to the exact host source.
//!
//! ```rust-example
//! let document = tagstyle::parse(source)?;
//! for decl in document.roots[0].declarations() {
//!     println!("{} at {}", decl.prop, decl.source.as_ref().unwrap().start);
//! }
//! assert_eq!(tagstyle::stringify(&document), source);
//! ```
//!
//! ## Modules
//!
//! - [`host`]: finds tagged templates in JS/TS source
//! - [`style`]: style-sheet tree, dialects (CSS, SCSS, LESS), parser and printer
//! - [`embed`]: extraction, position correction and host-safe printing
//! - [`syntax`]: configuration presets and the [`Syntax`](syntax::Syntax) entry point
//! - [`formats`]: treeviz and JSON output
//!
//! ## Testing
//!
//! Position assertions shared by the test suites live in [`testing`].

pub mod embed;
pub mod formats;
pub mod host;
pub mod position;
pub mod registry;
pub mod style;
pub mod syntax;
pub mod testing;

use embed::{stringify_document, Assembler, StyleDocument};
use host::{HostParseError, TemplateScanner};
use style::{CssDialect, ParseOptions};
use syntax::SyntaxOptions;

/// Parse a host file with the default styled-components configuration
pub fn parse(source: &str) -> Result<StyleDocument, HostParseError> {
    let options = SyntaxOptions::default();
    let directive = options.directive();
    Assembler {
        host: &TemplateScanner,
        dialect: &CssDialect,
        matcher: &options.matcher,
        disable_directive: &directive,
    }
    .parse(source, &ParseOptions::default())
}

/// Print a document parsed with the default configuration
pub fn stringify(document: &StyleDocument) -> String {
    stringify_document(document, &CssDialect)
}
