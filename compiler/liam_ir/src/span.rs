//! Source location spans.
//!
//! Compact 8-byte byte ranges into the source buffer, plus line/column
//! resolution for error reporting.

use std::fmt;

/// Source location span.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from file start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Convert to a `std::ops::Range`.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Slice the text this span covers out of `source`.
    ///
    /// Returns an empty string if the span is out of bounds or does not
    /// fall on character boundaries.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.to_range()).unwrap_or_default()
    }

    /// Resolve the start of this span to a 1-based line and column.
    pub fn line_col(&self, source: &str) -> LineCol {
        let offset = (self.start as usize).min(source.len());
        let before = source.get(..offset).unwrap_or_default();
        let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        LineCol { line, column }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// 1-based line/column position.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_span_basic() {
        let span = Span::new(10, 20);
        assert_eq!(span.to_range(), 10..20);
        assert_eq!(Span::point(3), Span::new(3, 3));
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::new(10, 20).merge(Span::new(15, 30));
        assert_eq!(merged, Span::new(10, 30));
    }

    #[test]
    fn test_span_text() {
        let source = "fn main() int {}";
        assert_eq!(Span::new(3, 7).text(source), "main");
        assert_eq!(Span::new(40, 50).text(source), "");
    }

    #[test]
    fn test_line_col() {
        let source = "fn a() int {\n  return x;\n}";
        let span = Span::new(22, 23);
        assert_eq!(span.text(source), "x");
        assert_eq!(span.line_col(source), LineCol { line: 2, column: 10 });
        assert_eq!(Span::point(0).line_col(source).to_string(), "1:1");
    }
}
