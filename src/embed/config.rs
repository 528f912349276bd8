//! Per-block bookkeeping attached to every extracted root

use super::indent::BaseIndentations;
use serde::Serialize;

/// A cumulative correction: bytes and line breaks removed from one edge of a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Offset {
    pub offset: usize,
    pub lines: usize,
}

impl Offset {
    pub fn new(offset: usize, lines: usize) -> Self {
        Self { offset, lines }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Offsets {
    pub prefix: Offset,
    pub suffix: Offset,
}

/// Everything needed to map a block back into its host file
///
/// Owned by the root it is attached to and read-only after extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockConfig {
    /// Host text trimmed away before the style text was built
    pub source_offsets: Offsets,
    /// Style text dropped by the indent normalizer (the blank opening line)
    pub css_offsets: Offsets,
    pub base_indentations: BaseIndentations,
    /// Verbatim `${...}` text of every hole, in order
    pub expression_strings: Vec<String>,
}

impl BlockConfig {
    /// Bytes from the first content byte to the first normalized byte
    pub fn prefix_offset(&self) -> usize {
        self.source_offsets.prefix.offset + self.css_offsets.prefix.offset
    }

    /// Lines from the first content line to the first normalized line
    pub fn prefix_lines(&self) -> usize {
        self.source_offsets.prefix.lines + self.css_offsets.prefix.lines
    }

    pub fn expression(&self, index: usize) -> Option<&str> {
        self.expression_strings.get(index).map(String::as_str)
    }
}
