//! Indentation normalizer
//!
//! Style text inside a template is usually indented to match the host code:
//!
//! ```text
//! const Button = styled.button`
//!     color: red;
//!   `;
//! ```
//!
//! The column of the closing backtick sets the base indentation. A blank
//! first line (the rest of the opening line) is dropped, and every remaining
//! line that starts with at least `base` spaces or tabs loses exactly that
//! many bytes. The stripped text of each line is kept in
//! [`BaseIndentations`] so the exact whitespace (tabs included) can be put
//! back when printing.

use super::config::Offset;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t\r]*$").expect("blank line pattern is valid"));

/// Addresses a stripped indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentLine {
    /// A 1-based line of the normalized text
    Line(usize),
    /// The last line of the block, where the root's trailing whitespace lives
    Trailing,
}

/// Indentation stripped from each normalized line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BaseIndentations {
    lines: BTreeMap<usize, String>,
    trailing: Option<String>,
}

impl BaseIndentations {
    pub fn insert(&mut self, line: IndentLine, stripped: impl Into<String>) {
        match line {
            IndentLine::Line(n) => {
                self.lines.insert(n, stripped.into());
            }
            IndentLine::Trailing => self.trailing = Some(stripped.into()),
        }
    }

    pub fn get(&self, line: IndentLine) -> Option<&str> {
        match line {
            IndentLine::Line(n) => self.lines.get(&n).map(String::as_str),
            IndentLine::Trailing => self.trailing.as_deref(),
        }
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.get(IndentLine::Line(line))
    }

    /// Bytes stripped from `line` (0 when untouched)
    pub fn width(&self, line: usize) -> usize {
        self.line(line).map_or(0, str::len)
    }

    /// Bytes stripped from lines `1..=through`
    pub fn cumulative(&self, through: usize) -> usize {
        self.lines.range(..=through).map(|(_, s)| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.trailing.is_none()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Output of [`normalize`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub source: String,
    pub base_indentations: BaseIndentations,
    /// The dropped blank first line, if any
    pub prefix: Offset,
}

/// Base indentation for a template whose closing backtick sits at `column`
pub fn base_indentation(closing_column: usize) -> usize {
    closing_column.saturating_sub(1)
}

pub fn normalize(text: &str, base: usize) -> Normalized {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let mut prefix = Offset::default();

    if lines.len() > 1 && BLANK_LINE.is_match(lines[0]) {
        prefix = Offset::new(lines[0].len() + 1, 1);
        lines.remove(0);
    }

    let mut base_indentations = BaseIndentations::default();
    let last = lines.len() - 1;
    let mut out = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let strippable = base > 0
            && line.len() >= base
            && line.as_bytes()[..base]
                .iter()
                .all(|b| *b == b' ' || *b == b'\t');
        if !strippable {
            out.push(*line);
            continue;
        }

        let (stripped, rest) = line.split_at(base);
        base_indentations.insert(IndentLine::Line(i + 1), stripped);
        if i == last {
            base_indentations.insert(IndentLine::Trailing, stripped);
        }
        out.push(rest);
    }

    Normalized {
        source: out.join("\n"),
        base_indentations,
        prefix,
    }
}
