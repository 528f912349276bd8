//! Built-in dialects

use super::ast::Root;
use super::error::StyleParseError;
use super::parser::{parse, DialectFlags};
use super::{Dialect, ParseOptions};

fn parse_with(
    text: &str,
    options: &ParseOptions,
    flags: DialectFlags,
) -> Result<Root, StyleParseError> {
    let mut root = parse(text, flags)?;
    root.from = options.from.clone();
    Ok(root)
}

/// Plain CSS: block comments only
#[derive(Debug, Clone, Copy, Default)]
pub struct CssDialect;

impl Dialect for CssDialect {
    fn name(&self) -> &str {
        "css"
    }

    fn description(&self) -> &str {
        "Plain CSS"
    }

    fn parse(&self, text: &str, options: &ParseOptions) -> Result<Root, StyleParseError> {
        parse_with(text, options, DialectFlags::default())
    }
}

/// SCSS: `//` comments and `#{}` interpolation
#[derive(Debug, Clone, Copy, Default)]
pub struct ScssDialect;

impl Dialect for ScssDialect {
    fn name(&self) -> &str {
        "scss"
    }

    fn description(&self) -> &str {
        "SCSS with inline comments and interpolation"
    }

    fn parse(&self, text: &str, options: &ParseOptions) -> Result<Root, StyleParseError> {
        parse_with(
            text,
            options,
            DialectFlags {
                inline_comments: true,
                bare_statements: false,
            },
        )
    }
}

/// LESS: `//` comments, `@{}` interpolation and mixin calls
#[derive(Debug, Clone, Copy, Default)]
pub struct LessDialect;

impl Dialect for LessDialect {
    fn name(&self) -> &str {
        "less"
    }

    fn description(&self) -> &str {
        "LESS with inline comments and mixin calls"
    }

    fn parse(&self, text: &str, options: &ParseOptions) -> Result<Root, StyleParseError> {
        parse_with(
            text,
            options,
            DialectFlags {
                inline_comments: true,
                bare_statements: true,
            },
        )
    }
}
