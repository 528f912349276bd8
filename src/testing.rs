//! Testing utilities for host-coordinate assertions
//!
//! A corrected range is only right if both halves agree: slicing the host
//! file by the byte span and by the line/column pair must give the same
//! text. [`assert_located`] checks that, and then whatever the test expects:
//!
//! ```rust-example
//! let decl = document.roots[0].declarations()[0];
//! assert_located(source, decl.source.as_ref().unwrap())
//!     .text("color: hotpink;")
//!     .starts_at(3, 5);
//! ```

use crate::position::{Position, Range, SourceLocation};

/// Host text covered by the byte span
pub fn slice_by_span<'s>(source: &'s str, range: &Range) -> &'s str {
    source.get(range.span.clone()).unwrap_or_default()
}

/// Host text covered by the line/column pair
pub fn slice_by_position<'s>(source: &'s str, range: &Range) -> Option<&'s str> {
    let location = SourceLocation::new(source);
    let start = location.position_to_byte(range.start)?;
    let end = location.position_to_byte(range.end)?;
    source.get(start..end)
}

pub struct LocatedAssertion<'a> {
    source: &'a str,
    range: &'a Range,
}

/// Check that `range` is consistent within `source`, then allow further checks
#[track_caller]
pub fn assert_located<'a>(source: &'a str, range: &'a Range) -> LocatedAssertion<'a> {
    let by_span = slice_by_span(source, range);
    let by_position = slice_by_position(source, range);
    assert_eq!(
        Some(by_span),
        by_position,
        "span {:?} and positions {} disagree",
        range.span,
        range
    );
    LocatedAssertion { source, range }
}

impl<'a> LocatedAssertion<'a> {
    #[track_caller]
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(slice_by_span(self.source, self.range), expected);
        self
    }

    #[track_caller]
    pub fn starts_at(self, line: usize, column: usize) -> Self {
        assert_eq!(self.range.start, Position::new(line, column), "start of {}", self.range);
        self
    }

    #[track_caller]
    pub fn ends_at(self, line: usize, column: usize) -> Self {
        assert_eq!(self.range.end, Position::new(line, column), "end of {}", self.range);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_agree() {
        let source = "ab\ncd";
        let range = SourceLocation::new(source).byte_range_to_range(&(1..4));
        assert_located(source, &range)
            .text("b\nc")
            .starts_at(1, 2)
            .ends_at(2, 2);
    }

    #[test]
    #[should_panic(expected = "disagree")]
    fn test_inconsistent_range_panics() {
        let range = Range::new(0..1, Position::new(1, 1), Position::new(1, 3));
        assert_located("abc", &range);
    }
}
