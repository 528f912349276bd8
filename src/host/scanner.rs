//! Lexical scanner that finds tagged templates in JS/TS sources
//!
//! The scanner walks the logos token stream once, keeping three pieces of
//! state:
//!
//! - a **level stack**, one entry per open `(`, `[`, `{` or `${` hole,
//! - the **tag chain**: the member/call expression built from the tokens
//!   immediately preceding the current position (`styled.div`,
//!   `styled(Button).attrs(...)`),
//! - per level, the **statement** currently open and the line comments that
//!   lead it.
//!
//! When a backtick arrives the current chain (if any) becomes the template's
//! tag. The template body is read by hand; each `${` pushes a hole level and
//! re-enters the token loop until the matching `}`.

use super::template::{HostModule, Quasi, TagExpr, TaggedTemplate, TemplateExpression};
use super::tokens::{HostToken, REGEX_KEYWORDS};
use super::{HostParseError, HostParser};
use crate::position::SourceLocation;
use logos::{Lexer, Logos};
use std::ops::Range as ByteRange;

/// Upper bound on how far `<...>` type arguments are looked ahead
const MAX_TYPE_ARGUMENTS: usize = 512;

/// The built-in [`HostParser`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateScanner;

impl TemplateScanner {
    pub fn new() -> Self {
        Self
    }
}

impl HostParser for TemplateScanner {
    fn parse_module(&self, source: &str) -> Result<HostModule, HostParseError> {
        let mut scan = Scan::new(source);
        let mut lexer = HostToken::lexer(source);
        scan.run(&mut lexer, false)?;

        let mut templates = scan.templates;
        templates.sort_by_key(|t| t.range.start);
        Ok(HostModule { templates })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelKind {
    Top,
    Paren,
    Bracket,
    Brace,
    Hole,
}

#[derive(Debug, Clone)]
struct Chain {
    expr: TagExpr,
    start: usize,
}

#[derive(Debug, Default)]
struct Statement {
    /// Line comments seen while no statement was open
    pending: Vec<String>,
    /// Comments that led the open statement
    leading: Vec<String>,
    open: bool,
    /// A newline followed an expression end; the next token decides
    maybe_ended: bool,
    ends_expression: bool,
}

impl Statement {
    fn end(&mut self) {
        self.open = false;
        self.maybe_ended = false;
        self.leading.clear();
    }
}

#[derive(Debug)]
struct Level {
    kind: LevelKind,
    saved: Option<Chain>,
    statement: Statement,
}

impl Level {
    fn new(kind: LevelKind, saved: Option<Chain>) -> Self {
        Self {
            kind,
            saved,
            statement: Statement::default(),
        }
    }
}

struct Scan<'s> {
    source: &'s str,
    location: SourceLocation,
    levels: Vec<Level>,
    chain: Option<Chain>,
    after_dot: bool,
    regex_allowed: bool,
    templates: Vec<TaggedTemplate>,
}

impl<'s> Scan<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            location: SourceLocation::new(source),
            levels: vec![Level::new(LevelKind::Top, None)],
            chain: None,
            after_dot: false,
            regex_allowed: true,
            templates: Vec::new(),
        }
    }

    /// Runs the token loop. Inside a hole, returns the offset of the closing `}`.
    fn run(
        &mut self,
        lexer: &mut Lexer<'s, HostToken>,
        in_hole: bool,
    ) -> Result<Option<usize>, HostParseError> {
        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let Ok(token) = result else {
                self.reset_chain();
                continue;
            };

            match token {
                HostToken::Whitespace | HostToken::BlockComment => continue,
                HostToken::Newline => {
                    self.newline();
                    continue;
                }
                HostToken::LineComment => {
                    let source = self.source;
                    self.line_comment(&source[span.start + 2..span.end]);
                    continue;
                }
                _ => {}
            }

            self.begin_statement(token);

            match token {
                HostToken::Identifier => {
                    let name = lexer.slice();
                    self.chain = match (self.chain.take(), self.after_dot) {
                        (Some(chain), true) => Some(Chain {
                            expr: chain.expr.member(name),
                            start: chain.start,
                        }),
                        _ => Some(Chain {
                            expr: TagExpr::ident(name),
                            start: span.start,
                        }),
                    };
                    self.after_dot = false;
                }
                HostToken::PrivateName => {
                    match (self.chain.take(), self.after_dot) {
                        (Some(chain), true) => {
                            self.chain = Some(Chain {
                                expr: chain.expr.member(lexer.slice()),
                                start: chain.start,
                            })
                        }
                        _ => self.chain = None,
                    }
                    self.after_dot = false;
                }
                HostToken::Dot | HostToken::OptionalChain => {
                    self.after_dot = self.chain.is_some();
                }
                HostToken::LParen => self.open(LevelKind::Paren, true),
                HostToken::LBracket => self.open(LevelKind::Bracket, true),
                HostToken::LBrace => self.open(LevelKind::Brace, false),
                HostToken::RParen | HostToken::RBracket | HostToken::RBrace => {
                    if let Some(level) = self.close(token) {
                        if level.kind == LevelKind::Hole {
                            if in_hole {
                                return Ok(Some(span.start));
                            }
                        } else {
                            self.chain = match level.kind {
                                LevelKind::Paren => level.saved.map(|c| Chain {
                                    expr: c.expr.call(),
                                    start: c.start,
                                }),
                                LevelKind::Bracket => level.saved.map(|c| Chain {
                                    expr: TagExpr::Computed(Box::new(c.expr)),
                                    start: c.start,
                                }),
                                _ => None,
                            };
                            self.after_dot = false;
                        }
                    }
                }
                HostToken::Backtick => {
                    let tag = self.chain.take();
                    self.after_dot = false;
                    self.template(lexer, tag)?;
                }
                HostToken::Slash => {
                    if self.regex_allowed {
                        self.skip_regex(lexer);
                    }
                    self.reset_chain();
                }
                HostToken::Lt => {
                    if self.chain.is_none() || !self.skip_type_arguments(lexer) {
                        self.reset_chain();
                    }
                }
                HostToken::Semicolon | HostToken::Comma => {
                    self.reset_chain();
                    self.statement().end();
                }
                _ => self.reset_chain(),
            }

            self.regex_allowed = match token {
                HostToken::Identifier => REGEX_KEYWORDS.contains(&lexer.slice()),
                HostToken::Semicolon | HostToken::Comma => true,
                other => !other.ends_expression(),
            };
            if !matches!(token, HostToken::Semicolon | HostToken::Comma) {
                self.statement().ends_expression = token.ends_expression();
            }
        }

        Ok(None)
    }

    fn reset_chain(&mut self) {
        self.chain = None;
        self.after_dot = false;
    }

    fn statement(&mut self) -> &mut Statement {
        let index = self.levels.len() - 1;
        &mut self.levels[index].statement
    }

    fn begin_statement(&mut self, token: HostToken) {
        let continues = matches!(
            token,
            HostToken::Dot
                | HostToken::OptionalChain
                | HostToken::Operator
                | HostToken::Arrow
                | HostToken::LParen
                | HostToken::LBracket
                | HostToken::Backtick
                | HostToken::Comma
                | HostToken::Lt
                | HostToken::Gt
                | HostToken::Slash
        );
        let statement = self.statement();
        if statement.maybe_ended {
            statement.maybe_ended = false;
            if continues {
                statement.pending.clear();
            } else {
                statement.end();
            }
        }
        if !statement.open {
            statement.open = true;
            statement.leading = std::mem::take(&mut statement.pending);
        }
    }

    fn newline(&mut self) {
        let kind = self.levels.last().map(|l| l.kind);
        if !matches!(kind, Some(LevelKind::Top) | Some(LevelKind::Brace)) {
            return;
        }
        let statement = self.statement();
        if statement.open && statement.ends_expression {
            statement.maybe_ended = true;
        }
    }

    fn line_comment(&mut self, text: &str) {
        let statement = self.statement();
        if !statement.open || statement.maybe_ended {
            statement.pending.push(text.to_string());
        }
    }

    fn open(&mut self, kind: LevelKind, keeps_chain: bool) {
        let saved = if keeps_chain { self.chain.take() } else { None };
        self.reset_chain();
        self.levels.push(Level::new(kind, saved));
    }

    fn close(&mut self, token: HostToken) -> Option<Level> {
        let expected = match token {
            HostToken::RParen => LevelKind::Paren,
            HostToken::RBracket => LevelKind::Bracket,
            _ => LevelKind::Brace,
        };
        let top = self.levels.last()?.kind;
        let matches = top == expected || (token == HostToken::RBrace && top == LevelKind::Hole);
        if matches && top != LevelKind::Top {
            self.levels.pop()
        } else {
            None
        }
    }

    fn template(
        &mut self,
        lexer: &mut Lexer<'s, HostToken>,
        tag: Option<Chain>,
    ) -> Result<(), HostParseError> {
        let open = lexer.span();
        let leading_comments: Vec<String> = self
            .levels
            .iter()
            .flat_map(|level| level.statement.leading.iter().cloned())
            .collect();

        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        let mut quasi_start = open.end;

        let close = loop {
            let rest = lexer.remainder().as_bytes();
            let mut i = 0;
            let hole = loop {
                match rest.get(i) {
                    None => return Err(self.unterminated(open.start)),
                    Some(b'\\') => i += 2,
                    Some(b'`') => break false,
                    Some(b'$') if rest.get(i + 1) == Some(&b'{') => break true,
                    Some(_) => i += 1,
                }
            };

            let quasi_end = quasi_start + i;
            quasis.push(self.quasi(quasi_start..quasi_end));

            if !hole {
                lexer.bump(i + 1);
                break quasi_end;
            }

            lexer.bump(i + 2);
            let expression_start = quasi_end + 2;
            self.levels.push(Level::new(LevelKind::Hole, None));
            self.reset_chain();
            self.regex_allowed = true;

            let brace = self
                .run(lexer, true)?
                .ok_or_else(|| self.unterminated(open.start))?;
            expressions.push(TemplateExpression {
                range: expression_start..brace,
                start: self.location.byte_to_position(expression_start),
            });
            quasi_start = brace + 1;
        };

        if let Some(tag) = tag {
            self.templates.push(TaggedTemplate {
                tag: tag.expr,
                range: tag.start..close + 1,
                quasis,
                expressions,
                leading_comments,
            });
        }
        self.reset_chain();
        Ok(())
    }

    fn quasi(&self, range: ByteRange<usize>) -> Quasi {
        Quasi {
            start: self.location.byte_to_position(range.start),
            end: self.location.byte_to_position(range.end),
            raw: self.source[range.clone()].to_string(),
            range,
        }
    }

    fn unterminated(&self, offset: usize) -> HostParseError {
        HostParseError::UnterminatedTemplate {
            offset,
            position: self.location.byte_to_position(offset),
        }
    }

    /// The lexer has just produced `/` or `/=`; consume a regex literal if one follows.
    fn skip_regex(&mut self, lexer: &mut Lexer<'s, HostToken>) {
        let span = lexer.span();
        if let Some(len) = regex_body_len(&self.source[span.start + 1..]) {
            let end = span.start + 1 + len;
            if end > span.end {
                lexer.bump(end - span.end);
            }
        }
    }

    /// The lexer has just produced `<` after a tag chain; consume `<...>` if a
    /// template follows it.
    fn skip_type_arguments(&mut self, lexer: &mut Lexer<'s, HostToken>) -> bool {
        match type_arguments_len(lexer.remainder()) {
            Some(len) => {
                lexer.bump(len);
                true
            }
            None => false,
        }
    }
}

/// Length of a regex literal body plus closing slash and flags, `text` starting
/// right after the opening slash.
fn regex_body_len(text: &str) -> Option<usize> {
    let mut in_class = false;
    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' | '\r' => return None,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                if i == 0 {
                    return None;
                }
                let flags = text[i + 1..]
                    .bytes()
                    .take_while(|b| b.is_ascii_alphabetic())
                    .count();
                return Some(i + 1 + flags);
            }
            _ => {}
        }
    }
    None
}

/// Length of `...>` plus whitespace up to a backtick, `text` starting right
/// after the `<`.
fn type_arguments_len(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut previous = '<';
    for (i, c) in text.char_indices() {
        if i > MAX_TYPE_ARGUMENTS {
            return None;
        }
        match c {
            '<' => depth += 1,
            '>' if previous != '=' => {
                depth -= 1;
                if depth == 0 {
                    let after = &text[i + 1..];
                    let gap = after.len() - after.trim_start().len();
                    return after[gap..].starts_with('`').then_some(i + 1 + gap);
                }
            }
            '`' => return None,
            _ => {}
        }
        previous = c;
    }
    None
}
