//! Lossless style-sheet parser
//!
//! Works over the token stream from [`tokenize`]. Every byte of the input
//! ends up in exactly one place: a node's semantic text (`selector`, `prop`,
//! `value`, `params`, comment `text`), one of its raws, or a container's
//! `after`. Stray semicolons are folded into the following `before`/`after`.
//!
//! Statement classification looks ahead at bracket depth 0:
//!
//! - `{` first: a rule (or an at-rule with a block)
//! - `;`, `}` or end of input first: a declaration, which needs a `:`
//!
//! Node spans start at the first byte of the node and end one past its last
//! byte, the terminating `;` included.

use super::ast::{
    AtRule, AtRuleRaws, Comment, CommentRaws, CorrectedRaws, DeclRaws, Declaration, Node, Root,
    RootRaws, Rule, RuleRaws,
};
use super::error::StyleParseError;
use super::tokens::{tokenize, Spanned, StyleToken};
use crate::position::{Range, SourceLocation};

/// Grammar switches distinguishing the built-in dialects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialectFlags {
    /// `//` comments are comment nodes
    pub inline_comments: bool,
    /// `;`-terminated statements without a colon are block-less rules
    pub bare_statements: bool,
}

pub fn parse(source: &str, flags: DialectFlags) -> Result<Root, StyleParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        flags,
        location: SourceLocation::new(source),
    };
    parser.root()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Open(usize),
    Semicolon(usize),
    Close(usize),
    End(usize),
}

impl Stop {
    fn index(self) -> usize {
        match self {
            Stop::Open(i) | Stop::Semicolon(i) | Stop::Close(i) | Stop::End(i) => i,
        }
    }
}

struct Block {
    nodes: Vec<Node>,
    after: String,
    semicolon: bool,
    end: usize,
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
    flags: DialectFlags,
    location: SourceLocation,
}

impl<'a> Parser<'a> {
    fn root(&mut self) -> Result<Root, StyleParseError> {
        let block = self.block(None)?;
        Ok(Root {
            nodes: block.nodes,
            raws: RootRaws {
                after: Some(block.after),
                semicolon: block.semicolon,
            },
            source: Some(self.range(0, self.source.len())),
            ..Root::default()
        })
    }

    /// Parse children until the `}` matching `open`, or end of input at top level
    fn block(&mut self, open: Option<usize>) -> Result<Block, StyleParseError> {
        let source = self.source;
        let mut nodes = Vec::new();
        let mut pending = String::new();
        let mut semicolon = false;

        let end = loop {
            let Some((token, span)) = self.tokens.get(self.pos).cloned() else {
                if let Some(open) = open {
                    return Err(StyleParseError::UnclosedBlock {
                        position: self.location.byte_to_position(open),
                    });
                }
                break source.len();
            };

            match token {
                StyleToken::Space | StyleToken::Semicolon => {
                    pending.push_str(&source[span]);
                    self.pos += 1;
                }
                StyleToken::CloseCurly => {
                    if open.is_none() {
                        return Err(StyleParseError::UnexpectedClose {
                            position: self.location.byte_to_position(span.start),
                        });
                    }
                    self.pos += 1;
                    break span.end;
                }
                StyleToken::Comment => {
                    let text = &source[span.start + 2..span.end - 2];
                    nodes.push(self.comment(std::mem::take(&mut pending), text, false, span));
                    semicolon = false;
                }
                StyleToken::LineComment if self.flags.inline_comments => {
                    let text = &source[span.start + 2..span.end];
                    nodes.push(self.comment(std::mem::take(&mut pending), text, true, span));
                    semicolon = false;
                }
                StyleToken::AtWord => {
                    let (node, terminated) = self.at_rule(std::mem::take(&mut pending))?;
                    nodes.push(node);
                    semicolon = terminated;
                }
                _ => {
                    let (node, terminated) = self.statement(std::mem::take(&mut pending))?;
                    nodes.push(node);
                    semicolon = terminated;
                }
            }
        };

        Ok(Block {
            nodes,
            after: pending,
            semicolon,
            end,
        })
    }

    fn comment(
        &mut self,
        before: String,
        text: &str,
        inline: bool,
        span: std::ops::Range<usize>,
    ) -> Node {
        self.pos += 1;
        Node::Comment(Comment {
            text: text.to_string(),
            inline,
            raws: CommentRaws {
                before: Some(before),
            },
            source: Some(self.range(span.start, span.end)),
            corrected: CorrectedRaws::default(),
        })
    }

    fn statement(&mut self, before: String) -> Result<(Node, bool), StyleParseError> {
        let from = self.pos;
        match self.find_stop(from) {
            Stop::Open(open) => Ok((self.rule(before, from, open)?, false)),
            stop => self.declaration(before, from, stop),
        }
    }

    fn rule(
        &mut self,
        before: String,
        from: usize,
        open: usize,
    ) -> Result<Node, StyleParseError> {
        let start = self.tokens[from].1.start;
        let open_start = self.tokens[open].1.start;
        let selector_end = self
            .last_significant(from, open)
            .map_or(start, |i| self.tokens[i].1.end);

        self.pos = open + 1;
        let block = self.block(Some(open_start))?;

        Ok(Node::Rule(Rule {
            selector: self.source[start..selector_end].to_string(),
            nodes: block.nodes,
            mixin: false,
            raws: RuleRaws {
                before: Some(before),
                between: Some(self.source[selector_end..open_start].to_string()),
                after: Some(block.after),
                semicolon: block.semicolon,
            },
            source: Some(self.range(start, block.end)),
            corrected: CorrectedRaws::default(),
        }))
    }

    fn declaration(
        &mut self,
        before: String,
        from: usize,
        stop: Stop,
    ) -> Result<(Node, bool), StyleParseError> {
        let stop_index = stop.index();
        let start = self.tokens[from].1.start;

        let Some(colon) = self.find_colon(from, stop_index) else {
            if let (true, Stop::Semicolon(semi)) = (self.flags.bare_statements, stop) {
                return Ok((self.bare_rule(before, from, semi), true));
            }
            let (_, span) = &self.tokens[from];
            return Err(StyleParseError::UnknownWord {
                word: self.source[span.clone()].to_string(),
                position: self.location.byte_to_position(span.start),
            });
        };

        let colon_span = self.tokens[colon].1.clone();
        let prop_end = self
            .last_significant(from, colon)
            .map_or(colon_span.start, |i| self.tokens[i].1.end);

        let first = self.first_significant(colon + 1, stop_index);
        let last = self.last_significant(colon + 1, stop_index);

        let (value_start, value_end, resume) = match (first, last) {
            (Some(first), Some(last)) => (
                self.tokens[first].1.start,
                self.tokens[last].1.end,
                last + 1,
            ),
            _ => match stop {
                Stop::Semicolon(semi) => {
                    let at = self.tokens[semi].1.start;
                    (at, at, semi)
                }
                _ => (colon_span.end, colon_span.end, colon + 1),
            },
        };

        let (after, end, terminated) = match stop {
            Stop::Semicolon(semi) => {
                let semi_span = self.tokens[semi].1.clone();
                self.pos = semi + 1;
                (
                    self.source[value_end..semi_span.start].to_string(),
                    semi_span.end,
                    true,
                )
            }
            _ => {
                self.pos = resume;
                (String::new(), value_end, false)
            }
        };

        let node = Node::Declaration(Declaration {
            prop: self.source[start..prop_end].to_string(),
            value: self.source[value_start..value_end].to_string(),
            raws: DeclRaws {
                before: Some(before),
                between: Some(self.source[prop_end..value_start].to_string()),
                after: Some(after),
            },
            source: Some(self.range(start, end)),
            corrected: CorrectedRaws::default(),
        });
        Ok((node, terminated))
    }

    fn bare_rule(&mut self, before: String, from: usize, semi: usize) -> Node {
        let start = self.tokens[from].1.start;
        let semi_span = self.tokens[semi].1.clone();
        let selector_end = self
            .last_significant(from, semi)
            .map_or(start, |i| self.tokens[i].1.end);
        self.pos = semi + 1;

        Node::Rule(Rule {
            selector: self.source[start..selector_end].to_string(),
            nodes: Vec::new(),
            mixin: true,
            raws: RuleRaws {
                before: Some(before),
                between: Some(self.source[selector_end..semi_span.start].to_string()),
                after: None,
                semicolon: false,
            },
            source: Some(self.range(start, semi_span.end)),
            corrected: CorrectedRaws::default(),
        })
    }

    fn at_rule(&mut self, before: String) -> Result<(Node, bool), StyleParseError> {
        let at = self.pos;
        let at_span = self.tokens[at].1.clone();
        let name = self.source[at_span.start + 1..at_span.end].to_string();
        let stop = self.find_stop(at + 1);
        let stop_index = stop.index();

        let first = self.first_significant(at + 1, stop_index);
        let last = self.last_significant(at + 1, stop_index);
        let (params_start, params_end, resume) = match (first, last) {
            (Some(first), Some(last)) => (
                self.tokens[first].1.start,
                self.tokens[last].1.end,
                last + 1,
            ),
            _ => (at_span.end, at_span.end, at + 1),
        };

        let mut raws = AtRuleRaws {
            before: Some(before),
            after_name: Some(self.source[at_span.end..params_start].to_string()),
            between: Some(String::new()),
            after: None,
            semicolon: false,
        };

        let (nodes, end, terminated) = match stop {
            Stop::Open(open) => {
                let open_start = self.tokens[open].1.start;
                raws.between = Some(self.source[params_end..open_start].to_string());
                self.pos = open + 1;
                let block = self.block(Some(open_start))?;
                raws.after = Some(block.after);
                raws.semicolon = block.semicolon;
                (Some(block.nodes), block.end, false)
            }
            Stop::Semicolon(semi) => {
                let semi_span = self.tokens[semi].1.clone();
                raws.between = Some(self.source[params_end..semi_span.start].to_string());
                self.pos = semi + 1;
                (None, semi_span.end, true)
            }
            Stop::Close(_) | Stop::End(_) => {
                self.pos = resume;
                (None, params_end, false)
            }
        };

        let node = Node::AtRule(AtRule {
            name,
            params: self.source[params_start..params_end].to_string(),
            nodes,
            raws,
            source: Some(self.range(at_span.start, end)),
            corrected: CorrectedRaws::default(),
        });
        Ok((node, terminated))
    }

    /// First `{`, `;` or `}` at bracket depth 0, starting at `from`
    fn find_stop(&self, from: usize) -> Stop {
        let mut depth = 0usize;
        for (i, (token, _)) in self.tokens.iter().enumerate().skip(from) {
            match token {
                StyleToken::OpenParen | StyleToken::OpenSquare => depth += 1,
                StyleToken::CloseParen | StyleToken::CloseSquare => {
                    depth = depth.saturating_sub(1)
                }
                StyleToken::OpenCurly if depth == 0 => return Stop::Open(i),
                StyleToken::Semicolon if depth == 0 => return Stop::Semicolon(i),
                StyleToken::CloseCurly if depth == 0 => return Stop::Close(i),
                _ => {}
            }
        }
        Stop::End(self.tokens.len())
    }

    fn find_colon(&self, from: usize, to: usize) -> Option<usize> {
        let mut depth = 0usize;
        for i in from..to {
            match self.tokens[i].0 {
                StyleToken::OpenParen | StyleToken::OpenSquare => depth += 1,
                StyleToken::CloseParen | StyleToken::CloseSquare => {
                    depth = depth.saturating_sub(1)
                }
                StyleToken::Colon if depth == 0 => return Some(i),
                _ => {}
            }
        }
        None
    }

    fn first_significant(&self, from: usize, to: usize) -> Option<usize> {
        (from..to).find(|&i| self.tokens[i].0 != StyleToken::Space)
    }

    fn last_significant(&self, from: usize, to: usize) -> Option<usize> {
        (from..to).rev().find(|&i| self.tokens[i].0 != StyleToken::Space)
    }

    fn range(&self, start: usize, end: usize) -> Range {
        self.location.byte_range_to_range(&(start..end))
    }
}
