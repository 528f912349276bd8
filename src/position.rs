//! Position and location tracking
//!
//! Every node produced by this crate carries a [`Range`]: a byte span plus a
//! start and end [`Position`]. Two coordinate spaces use the same types:
//!
//! - **local**: the normalized, de-indented style text handed to a dialect parser
//! - **global**: the original host file
//!
//! ## Conventions
//!
//! - Lines and columns are 1-based. Columns count bytes, not characters, so a
//!   position can always be turned back into a byte offset without re-reading
//!   the line.
//! - Byte offsets are 0-based.
//! - Ends are exclusive: `end` points one past the last byte of a construct.
//!
//! [`SourceLocation`] converts between offsets and positions with a binary
//! search over line starts.

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// A line:column position (both 1-based, column in bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// A source range: byte span plus start/end positions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }

    /// Check if a position is contained within this range (end inclusive)
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    pub fn len(&self) -> usize {
        self.span.end.saturating_sub(self.span.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0..0, Position::default(), Position::default())
    }
}

/// Fast conversion between byte offsets and line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );

        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to the end.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.len);
        let index = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        Position::new(index + 1, offset - self.line_starts[index] + 1)
    }

    /// Convert a position back to a byte offset, if the line exists
    pub fn position_to_byte(&self, position: Position) -> Option<usize> {
        let start = *self.line_starts.get(position.line.checked_sub(1)?)?;
        let offset = start + position.column.checked_sub(1)?;
        (offset <= self.len).then_some(offset)
    }

    pub fn byte_range_to_range(&self, range: &ByteRange<usize>) -> Range {
        Range::new(
            range.clone(),
            self.byte_to_position(range.start),
            self.byte_to_position(range.end),
        )
    }

    /// 1-based line number containing `byte_offset`
    pub fn line_of(&self, byte_offset: usize) -> usize {
        self.byte_to_position(byte_offset).line
    }

    /// True when `byte_offset` is the first byte of a line
    pub fn is_line_start(&self, byte_offset: usize) -> bool {
        self.line_starts.binary_search(&byte_offset).is_ok()
    }

    /// Length of the text in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset for the start of a 1-based line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line.checked_sub(1)?).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 5));
        assert_eq!(Position::default(), Position::new(1, 1));
    }

    #[test]
    fn test_byte_to_position() {
        let loc = SourceLocation::new("ab\ncd\n\nef");

        assert_eq!(loc.byte_to_position(0), Position::new(1, 1));
        assert_eq!(loc.byte_to_position(2), Position::new(1, 3));
        assert_eq!(loc.byte_to_position(3), Position::new(2, 1));
        assert_eq!(loc.byte_to_position(6), Position::new(3, 1));
        assert_eq!(loc.byte_to_position(7), Position::new(4, 1));
        assert_eq!(loc.byte_to_position(9), Position::new(4, 3));
        assert_eq!(loc.byte_to_position(99), Position::new(4, 3));
    }

    #[test]
    fn test_position_to_byte_inverts() {
        let source = "one\n  two\nthree";
        let loc = SourceLocation::new(source);

        for offset in 0..=source.len() {
            let pos = loc.byte_to_position(offset);
            assert_eq!(loc.position_to_byte(pos), Some(offset));
        }
        assert_eq!(loc.position_to_byte(Position::new(9, 1)), None);
        assert_eq!(loc.position_to_byte(Position::new(0, 1)), None);
    }

    #[test]
    fn test_columns_count_bytes() {
        let loc = SourceLocation::new("é;");
        assert_eq!(loc.byte_to_position(2), Position::new(1, 3));
    }

    #[test]
    fn test_line_helpers() {
        let loc = SourceLocation::new("a\nbb\n");

        assert_eq!(loc.line_count(), 3);
        assert_eq!(loc.line_start(2), Some(2));
        assert_eq!(loc.line_of(3), 2);
        assert!(loc.is_line_start(0));
        assert!(loc.is_line_start(5));
        assert!(!loc.is_line_start(3));
    }

    #[test]
    fn test_range_contains() {
        let range = Range::new(0..10, Position::new(1, 5), Position::new(2, 3));

        assert!(range.contains(Position::new(1, 5)));
        assert!(range.contains(Position::new(2, 1)));
        assert!(range.contains(Position::new(2, 3)));
        assert!(!range.contains(Position::new(1, 4)));
        assert!(!range.contains(Position::new(2, 4)));
        assert_eq!(range.len(), 10);
    }
}
