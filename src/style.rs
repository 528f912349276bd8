//! Style-sheet dialects
//!
//! The embedding engine treats a style grammar as a pluggable pair: parse text
//! into a [`Root`], print a [`Root`] through a [`Builder`]. [`Dialect`] is that
//! pair. The built-in CSS, SCSS and LESS dialects share one lossless parser
//! and printer and differ only in [`DialectFlags`].

pub mod ast;
pub mod dialect;
pub mod error;
pub mod parser;
pub mod registry;
pub mod stringifier;
pub mod tokens;

pub use ast::{
    AtRule, Comment, CorrectedRaws, Declaration, Node, NodeRef, RawKey, Root, Rule,
};
pub use dialect::{CssDialect, LessDialect, ScssDialect};
pub use error::StyleParseError;
pub use parser::DialectFlags;
pub use registry::{DialectRegistry, RegistryError};
pub use stringifier::{Boundary, Builder, NoOverrides, RawOverrides, Stringifier};

/// Options handed to a dialect parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Name of the input, copied onto the root
    pub from: Option<String>,
    /// Request source-map generation. The built-in dialects never build maps.
    pub map: bool,
}

impl ParseOptions {
    /// The same options with source maps switched off
    pub fn without_map(&self) -> Self {
        Self {
            from: self.from.clone(),
            map: false,
        }
    }
}

/// A style grammar: parser plus printer
pub trait Dialect: Send + Sync {
    /// Registry name (e.g. "css", "scss")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn parse(&self, text: &str, options: &ParseOptions) -> Result<Root, StyleParseError>;

    /// Print `root`, consulting `overrides` for every raw
    fn stringify(&self, root: &Root, overrides: &dyn RawOverrides, builder: &mut dyn Builder) {
        Stringifier::new(builder, overrides).root(root);
    }
}
