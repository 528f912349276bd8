//! Position correction
//!
//! The dialect parser sees normalized text: holes replaced by placeholders,
//! the blank opening line dropped, base indentation stripped. Its positions
//! are local to that text. [`PositionCorrector`] maps them back onto the host
//! file and records re-indented copies of every raw that spans a stripped
//! line start.
//!
//! Mapping a local `(offset, line, column)`:
//!
//! 1. Start from the first content byte of the template, plus the bytes and
//!    lines the normalizer dropped in front of the text.
//! 2. Replay every hole whose placeholder ends at or before the offset. Each
//!    adds `host length - placeholder length` bytes and the line breaks of
//!    its host text. A column delta follows the host line the last hole
//!    ended on; it accumulates while holes end on the same line and is
//!    recomputed from the hole's columns when a hole moves to a new line.
//! 3. The column delta only applies when the corrected line is that line.
//! 4. Put back the stripped indentation: the width stripped from the
//!    position's own line goes on the column, the widths stripped from every
//!    line up to and including it go on the offset.

use super::config::BlockConfig;
use super::indent::IndentLine;
use super::placeholder;
use crate::host::TaggedTemplate;
use crate::position::{Position, Range, SourceLocation};
use crate::style::ast::{AtRule, Comment, CorrectedRaws, Declaration, Node, RawKey, Root, Rule};
use std::collections::HashMap;

/// Where the template content starts in the host file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    offset: usize,
    line: usize,
    column: usize,
}

/// One `${...}` hole, in both coordinate spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hole {
    /// End of the placeholder in the normalized text (exclusive)
    local_end: usize,
    /// Host length minus placeholder length
    size: isize,
    placeholder_len: isize,
    start_line: usize,
    start_column: usize,
    end_line: usize,
    end_column: usize,
}

pub struct PositionCorrector<'a> {
    config: &'a BlockConfig,
    location: SourceLocation,
    anchor: Anchor,
    holes: Vec<Hole>,
}

impl<'a> PositionCorrector<'a> {
    /// `normalized` is the exact text the dialect parsed
    pub fn new(template: &TaggedTemplate, normalized: &str, config: &'a BlockConfig) -> Option<Self> {
        let first = template.quasis.first()?;
        let anchor = Anchor {
            offset: first.range.start,
            line: first.start.line,
            column: first.start.column,
        };

        let mut placeholders = HashMap::new();
        for found in placeholder::find_all(normalized) {
            placeholders.entry(found.index).or_insert(found.span);
        }

        let holes = template
            .quasis
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| {
                let span = placeholders.get(&i)?;
                let (previous, next) = (&pair[0], &pair[1]);
                let host_len = next.range.start.saturating_sub(previous.range.end) as isize;
                let placeholder_len = span.len() as isize;
                Some(Hole {
                    local_end: span.end,
                    size: host_len - placeholder_len,
                    placeholder_len,
                    start_line: previous.end.line,
                    start_column: previous.end.column,
                    end_line: next.start.line,
                    end_column: next.start.column,
                })
            })
            .collect();

        Some(Self {
            config,
            location: SourceLocation::new(normalized),
            anchor,
            holes,
        })
    }

    /// Map a local offset and position to host coordinates
    pub fn correct_position(&self, offset: usize, position: Position) -> (usize, Position) {
        let mut line_delta = self.anchor.line - 1 + self.config.prefix_lines();
        let mut byte = (offset + self.anchor.offset + self.config.prefix_offset()) as isize;
        let mut current_line = self.anchor.line;
        let mut column_delta = self.anchor.column as isize - 1;

        for hole in self.holes.iter().filter(|h| h.local_end <= offset) {
            byte += hole.size;
            line_delta += hole.end_line - hole.start_line;

            if current_line != hole.end_line {
                column_delta = if hole.start_line == hole.end_line {
                    hole.size
                } else {
                    let carried = if current_line == hole.start_line {
                        column_delta
                    } else {
                        0
                    };
                    hole.end_column as isize - hole.start_column as isize - hole.placeholder_len
                        + carried
                };
                current_line = hole.end_line;
            } else {
                column_delta += hole.size;
            }
        }

        let base = &self.config.base_indentations;
        let line = position.line + line_delta;
        let mut column = (position.column + base.width(position.line)) as isize;
        if line == current_line {
            column += column_delta;
        }
        let byte = byte + base.cumulative(position.line) as isize;

        (
            byte.max(0) as usize,
            Position::new(line, column.max(1) as usize),
        )
    }

    pub fn correct_range(&self, range: &Range) -> Range {
        let (start_offset, start) = self.correct_position(range.span.start, range.start);
        let (end_offset, end) = self.correct_position(range.span.end, range.end);
        Range::new(start_offset..end_offset, start, end)
    }

    /// Correct the root and every descendant in place
    pub fn correct_root(&self, root: &mut Root) {
        let mut corrected = CorrectedRaws::default();
        if let Some(after) = root.raws.after.as_deref() {
            let start = self.location.len().saturating_sub(after.len());
            self.record(&mut corrected, RawKey::After, after, start, Reindent::Trailing);
        }
        root.corrected = corrected;

        self.correct_nodes(&mut root.nodes);
        if let Some(source) = root.source.as_mut() {
            *source = self.correct_range(source);
        }
    }

    fn correct_nodes(&self, nodes: &mut [Node]) {
        for node in nodes.iter_mut() {
            if let Some(source) = node.source().cloned() {
                let corrected = match &*node {
                    Node::Rule(rule) => self.rule_raws(rule, &source),
                    Node::AtRule(at_rule) => self.at_rule_raws(at_rule, &source),
                    Node::Declaration(decl) => self.declaration_raws(decl, &source),
                    Node::Comment(comment) => self.comment_raws(comment, &source),
                };
                *node.corrected_mut() = corrected;
                *node.source_mut() = Some(self.correct_range(&source));
            }

            if let Some(children) = node.nodes_mut() {
                self.correct_nodes(children);
            }
        }
    }

    fn before(&self, corrected: &mut CorrectedRaws, before: Option<&str>, source: &Range) {
        if let Some(before) = before {
            let start = source.span.start.saturating_sub(before.len());
            self.record(corrected, RawKey::Before, before, start, Reindent::LineStart);
        }
    }

    fn rule_raws(&self, rule: &Rule, source: &Range) -> CorrectedRaws {
        let mut corrected = CorrectedRaws::default();
        self.before(&mut corrected, rule.raws.before.as_deref(), source);

        let mut at = source.span.start;
        self.record(&mut corrected, RawKey::Value, &rule.selector, at, Reindent::Inner);
        at += rule.selector.len();
        if let Some(between) = rule.raws.between.as_deref() {
            self.record(&mut corrected, RawKey::Between, between, at, Reindent::Inner);
        }
        if let Some(after) = rule.raws.after.as_deref() {
            self.record_closing(&mut corrected, after, source);
        }
        corrected
    }

    fn at_rule_raws(&self, at_rule: &AtRule, source: &Range) -> CorrectedRaws {
        let mut corrected = CorrectedRaws::default();
        self.before(&mut corrected, at_rule.raws.before.as_deref(), source);

        let mut at = source.span.start + 1 + at_rule.name.len();
        if let Some(after_name) = at_rule.raws.after_name.as_deref() {
            self.record(&mut corrected, RawKey::AfterName, after_name, at, Reindent::Inner);
            at += after_name.len();
        }
        self.record(&mut corrected, RawKey::Value, &at_rule.params, at, Reindent::Inner);
        at += at_rule.params.len();
        if let Some(between) = at_rule.raws.between.as_deref() {
            self.record(&mut corrected, RawKey::Between, between, at, Reindent::Inner);
        }
        if let (Some(_), Some(after)) = (&at_rule.nodes, at_rule.raws.after.as_deref()) {
            self.record_closing(&mut corrected, after, source);
        }
        corrected
    }

    fn declaration_raws(&self, decl: &Declaration, source: &Range) -> CorrectedRaws {
        let mut corrected = CorrectedRaws::default();
        self.before(&mut corrected, decl.raws.before.as_deref(), source);

        let mut at = source.span.start;
        self.record(&mut corrected, RawKey::Prop, &decl.prop, at, Reindent::Inner);
        at += decl.prop.len();
        if let Some(between) = decl.raws.between.as_deref() {
            self.record(&mut corrected, RawKey::Between, between, at, Reindent::Inner);
            at += between.len();
        }
        self.record(&mut corrected, RawKey::Value, &decl.value, at, Reindent::Inner);
        at += decl.value.len();
        if let Some(after) = decl.raws.after.as_deref() {
            self.record(&mut corrected, RawKey::After, after, at, Reindent::Inner);
        }
        corrected
    }

    fn comment_raws(&self, comment: &Comment, source: &Range) -> CorrectedRaws {
        let mut corrected = CorrectedRaws::default();
        self.before(&mut corrected, comment.raws.before.as_deref(), source);
        self.record(
            &mut corrected,
            RawKey::Value,
            &comment.text,
            source.span.start + 2,
            Reindent::Inner,
        );
        corrected
    }

    /// Whitespace in front of a closing `}`
    fn record_closing(&self, corrected: &mut CorrectedRaws, after: &str, source: &Range) {
        let start = source.span.end.saturating_sub(1 + after.len());
        self.record(corrected, RawKey::After, after, start, Reindent::Inner);
    }

    fn record(
        &self,
        corrected: &mut CorrectedRaws,
        key: RawKey,
        raw: &str,
        start: usize,
        mode: Reindent,
    ) {
        let reindented = self.reindent(raw, start, mode);
        if reindented != raw {
            corrected.insert(key, raw, reindented);
        }
    }

    /// Put the stripped indentation back in front of every line start inside `raw`
    fn reindent(&self, raw: &str, start: usize, mode: Reindent) -> String {
        let base = &self.config.base_indentations;
        let first_line = self.location.line_of(start);
        let owns_first = mode != Reindent::Inner && self.location.is_line_start(start);
        let segments: Vec<&str> = raw.split('\n').collect();
        let last = segments.len() - 1;

        let mut out = String::with_capacity(raw.len());
        for (k, segment) in segments.iter().enumerate() {
            let indent = match k {
                0 if !owns_first => None,
                k if k == last && k > 0 && mode == Reindent::Trailing => {
                    base.get(IndentLine::Trailing)
                }
                k => base.line(first_line + k),
            };
            if k > 0 {
                out.push('\n');
            }
            out.push_str(indent.unwrap_or_default());
            out.push_str(segment);
        }
        out
    }
}

/// Which line starts a raw owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reindent {
    /// Only line starts after a break inside the raw
    Inner,
    /// Also the raw's own first byte, when it begins a line
    LineStart,
    /// Like `LineStart`; the last line is the block's trailing line
    Trailing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::extract::extract;
    use crate::embed::indent::{base_indentation, normalize};
    use crate::host::{HostParser, TemplateScanner};
    use crate::style::{NodeRef, NoOverrides, RawOverrides, Stringifier};
    use crate::style::parser::{parse, DialectFlags};

    /// Run one template through the pipeline by hand
    fn corrected(source: &str) -> Root {
        let module = TemplateScanner.parse_module(source).unwrap();
        let template = &module.templates[0];
        let extracted = extract(template, source);
        let base = base_indentation(template.closing_delimiter().unwrap().column);
        let normalized = normalize(&extracted.text, base);
        let config = BlockConfig {
            source_offsets: crate::embed::config::Offsets {
                prefix: normalized.prefix,
                ..Default::default()
            },
            base_indentations: normalized.base_indentations,
            expression_strings: extracted.expression_strings,
            ..Default::default()
        };
        let mut root = parse(&normalized.source, DialectFlags::default()).unwrap();
        let corrector = PositionCorrector::new(template, &normalized.source, &config).unwrap();
        corrector.correct_root(&mut root);
        root.block = Some(config);
        root
    }

    fn slice<'s>(source: &'s str, range: &Range) -> &'s str {
        &source[range.span.clone()]
    }

    #[test]
    fn test_single_line_hole() {
        let source = "styled.h1`color: ${expr};`";
        let root = corrected(source);
        let decl = root.declarations()[0];
        let range = decl.source.as_ref().unwrap();

        assert_eq!(slice(source, range), "color: ${expr};");
        assert_eq!(range.start, Position::new(1, 11));
        assert_eq!(range.end, Position::new(1, 26));
    }

    #[test]
    fn test_indented_block() {
        let source = "const A = styled.div`\n    color: red;\n    margin: 0;\n`;\n";
        let root = corrected(source);
        let decls = root.declarations();

        let second = decls[1].source.as_ref().unwrap();
        assert_eq!(slice(source, second), "margin: 0;");
        assert_eq!(second.start, Position::new(3, 5));
        assert_eq!(second.end, Position::new(3, 15));
    }

    #[test]
    fn test_mixed_indentation() {
        let source = "  const A = styled.div`\n    a: b;\n      c: d;\n\t\te: f;\n  `;";
        let root = corrected(source);
        let decls = root.declarations();
        let expected = [("a: b;", 2, 5), ("c: d;", 3, 7), ("e: f;", 4, 3)];

        for (decl, (text, line, column)) in decls.iter().zip(expected) {
            let range = decl.source.as_ref().unwrap();
            assert_eq!(slice(source, range), text);
            assert_eq!(range.start, Position::new(line, column));
        }
    }

    #[test]
    fn test_multi_line_hole_then_same_line() {
        let source = "css`a: ${\n  x\n} b;\nc: d;`";
        let root = corrected(source);
        let decls = root.declarations();

        let first = decls[0].source.as_ref().unwrap();
        assert_eq!(slice(source, first), "a: ${\n  x\n} b;");
        assert_eq!(first.end, Position::new(3, 5));

        let second = decls[1].source.as_ref().unwrap();
        assert_eq!(slice(source, second), "c: d;");
        assert_eq!(second.start, Position::new(4, 1));
    }

    #[test]
    fn test_raws_are_reindented() {
        let source = "styled.div`\n  a {\n    b: c;\n  }\n  `";
        let root = corrected(source);
        let Node::Rule(rule) = &root.nodes[0] else {
            panic!("expected rule")
        };

        assert_eq!(rule.corrected.get(RawKey::Before, ""), Some("  "));
        assert_eq!(rule.corrected.get(RawKey::After, "\n"), Some("\n  "));
        let Node::Declaration(decl) = &rule.nodes[0] else {
            panic!("expected declaration")
        };
        assert_eq!(decl.corrected.get(RawKey::Before, "\n  "), Some("\n    "));
        assert_eq!(root.corrected.get(RawKey::After, "\n"), Some("\n  "));

        struct Corrected;
        impl RawOverrides for Corrected {
            fn raw<'n>(&self, node: NodeRef<'n>, key: RawKey, current: &str) -> Option<&'n str> {
                node.corrected().get(key, current)
            }
        }
        let mut out = String::new();
        Stringifier::new(&mut out, &Corrected).root(&root);
        assert_eq!(out, "  a {\n    b: c;\n  }\n  ");

        let mut plain = String::new();
        Stringifier::new(&mut plain, &NoOverrides).root(&root);
        assert_eq!(plain, "a {\n  b: c;\n}\n");
    }
}
