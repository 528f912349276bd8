//! Tagged template records reported by a [`HostParser`](super::HostParser)

use crate::position::Position;
use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// The shape of a template tag, as far as the matcher needs to know it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TagExpr {
    /// `name`
    Identifier(String),
    /// `object.property`
    Member {
        object: Box<TagExpr>,
        property: String,
    },
    /// `callee(...)`, arguments are not recorded
    Call(Box<TagExpr>),
    /// `object[...]`
    Computed(Box<TagExpr>),
    /// Anything else that can precede a template
    Other,
}

impl TagExpr {
    pub fn ident(name: &str) -> Self {
        TagExpr::Identifier(name.to_string())
    }

    pub fn member(self, property: &str) -> Self {
        TagExpr::Member {
            object: Box::new(self),
            property: property.to_string(),
        }
    }

    pub fn call(self) -> Self {
        TagExpr::Call(Box::new(self))
    }
}

impl fmt::Display for TagExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagExpr::Identifier(name) => write!(f, "{name}"),
            TagExpr::Member { object, property } => write!(f, "{object}.{property}"),
            TagExpr::Call(callee) => write!(f, "{callee}(…)"),
            TagExpr::Computed(object) => write!(f, "{object}[…]"),
            TagExpr::Other => write!(f, "…"),
        }
    }
}

/// One literal segment of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quasi {
    /// Content bytes, delimiters excluded
    pub range: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
    /// Raw (unescaped-as-written) text
    pub raw: String,
}

/// One `${ ... }` expression; `range` covers the expression body only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateExpression {
    pub range: ByteRange<usize>,
    pub start: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedTemplate {
    pub tag: TagExpr,
    /// From the first byte of the tag to just past the closing backtick
    pub range: ByteRange<usize>,
    /// Always one more than `expressions`
    pub quasis: Vec<Quasi>,
    pub expressions: Vec<TemplateExpression>,
    /// Line comments leading each statement that encloses the template, outermost first
    pub leading_comments: Vec<String>,
}

impl TaggedTemplate {
    /// Bytes between the backticks
    pub fn content_range(&self) -> Option<ByteRange<usize>> {
        let first = self.quasis.first()?;
        let last = self.quasis.last()?;
        Some(first.range.start..last.range.end)
    }

    /// Position of the first content byte
    pub fn content_start(&self) -> Option<Position> {
        self.quasis.first().map(|q| q.start)
    }

    /// Position of the closing backtick
    pub fn closing_delimiter(&self) -> Option<Position> {
        self.quasis.last().map(|q| q.end)
    }

    pub fn has_leading_comment(&self, text: &str) -> bool {
        self.leading_comments.iter().any(|c| c.trim() == text)
    }
}

/// Everything a host parser reports about one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostModule {
    /// Tagged templates in document order (outer before nested)
    pub templates: Vec<TaggedTemplate>,
}
