//! Lossless document printer
//!
//! Prints a [`StyleDocument`] back into host source. Host text recorded on
//! the roots is emitted untouched. Everything a dialect prints for a node
//! goes through [`HostSafeBuilder`], which turns placeholders back into their
//! `${...}` text and escapes what would otherwise end the template literal.
//! Raws come from the position corrector's re-indented copies when those are
//! still current.

use super::config::BlockConfig;
use super::document::StyleDocument;
use super::placeholder;
use crate::style::{Boundary, Builder, Dialect, NodeRef, RawKey, RawOverrides};

/// Prefers the re-indented raws recorded during correction
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrectedOverrides;

impl RawOverrides for CorrectedOverrides {
    fn raw<'n>(&self, node: NodeRef<'n>, key: RawKey, current: &str) -> Option<&'n str> {
        node.corrected().get(key, current)
    }
}

/// Escape text for the inside of a template literal
///
/// Text that is already valid template raw text comes back unchanged: escape
/// pairs are copied as they are, and only a bare backtick, a bare `${` and a
/// dangling final backslash are escaped. Node text is template raw text, so
/// a backslash inside it is kept as the start of an escape pair and is not
/// doubled. Text meant to be read literally by the host (CSS such as
/// `content: "\a"`) goes through [`to_template_raw`] before it is put on a
/// node.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push_str("\\\\"),
            },
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out
}

/// Turn literal style text into template raw text
///
/// Every backslash is doubled and backticks and `${` are escaped, so the
/// template's cooked value is exactly `text`. The result passes through
/// [`escape`] unchanged.
pub fn to_template_raw(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out
}

/// Wraps a builder, making node text safe for the host template
pub struct HostSafeBuilder<'a> {
    inner: &'a mut dyn Builder,
    config: Option<&'a BlockConfig>,
}

impl<'a> HostSafeBuilder<'a> {
    pub fn new(inner: &'a mut dyn Builder, config: Option<&'a BlockConfig>) -> Self {
        Self { inner, config }
    }

    fn expression(&self, index: usize) -> Option<&'a str> {
        self.config.and_then(|config| config.expression(index))
    }

    fn host_text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for found in placeholder::find_all(text) {
            out.push_str(&escape(&text[last..found.span.start]));
            match self.expression(found.index) {
                Some(expression) => out.push_str(expression),
                None => out.push_str(&escape(&text[found.span.clone()])),
            }
            last = found.span.end;
        }
        out.push_str(&escape(&text[last..]));
        out
    }
}

impl Builder for HostSafeBuilder<'_> {
    fn emit(&mut self, text: &str, node: Option<NodeRef<'_>>, boundary: Option<Boundary>) {
        match node {
            None | Some(NodeRef::Root(_)) => self.inner.emit(text, node, boundary),
            Some(NodeRef::Comment(_)) => {
                let resolved = placeholder::parse_fragment(text).and_then(|i| self.expression(i));
                match resolved {
                    Some(expression) => self.inner.emit(expression, node, boundary),
                    None => {
                        let safe = self.host_text(text);
                        self.inner.emit(&safe, node, boundary)
                    }
                }
            }
            Some(_) => {
                let safe = self.host_text(text);
                self.inner.emit(&safe, node, boundary);
            }
        }
    }
}

/// Print `document` into `builder`
pub fn write_document(document: &StyleDocument, dialect: &dyn Dialect, builder: &mut dyn Builder) {
    let Some(last) = document.roots.len().checked_sub(1) else {
        builder.emit(&document.source, None, None);
        return;
    };

    for (i, root) in document.roots.iter().enumerate() {
        let node = Some(NodeRef::Root(root));
        builder.emit(&root.leading_text, node, Some(Boundary::Start));

        let mut safe = HostSafeBuilder::new(builder, root.block.as_ref());
        dialect.stringify(root, &CorrectedOverrides, &mut safe);

        if i == last {
            if let Some(trailing) = &root.trailing_text {
                builder.emit(trailing, node, Some(Boundary::End));
            }
        }
    }
}

pub fn stringify_document(document: &StyleDocument, dialect: &dyn Dialect) -> String {
    let mut out = String::with_capacity(document.source.len());
    write_document(document, dialect, &mut out);
    out
}
