// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Internal addressing is in code units — offsets into the UTF-8 source
//! text, stored as `u32`. Human-facing diagnostics use
//! [`GraphemePosition`], whose column counts extended grapheme clusters
//! (UAX #29) rather than code units, so a combining sequence or a ZWJ emoji
//! occupies one column.

use std::ops::Range;

use ecow::EcoString;
use unicode_segmentation::UnicodeSegmentation;

/// A half-open range within a single line, in code units.
///
/// # Examples
///
/// ```
/// use mquery_core::lexing::Span;
///
/// let span = Span::new(0, 10);
/// assert_eq!(span.start(), 0);
/// assert_eq!(span.end(), 10);
/// assert_eq!(span.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// Creates a new span from start and end offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the start offset.
    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// Returns the end offset (exclusive).
    #[must_use]
    pub const fn end(self) -> u32 {
        self.end
    }

    /// Returns the length of the span in code units.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Converts to a `Range<usize>` for indexing into line text.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}

/// An absolute position in the source text.
///
/// `code_unit` is the offset from the start of the text, `line_code_unit`
/// the offset within the containing line, `line_number` zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub code_unit: u32,
    pub line_code_unit: u32,
    pub line_number: u32,
}

/// A human-facing position, derived on demand for error display.
///
/// `column_number` is 1-based and counts extended grapheme clusters from
/// the line start; `line_number` and `line_code_unit` stay zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphemePosition {
    pub line_number: u32,
    pub line_code_unit: u32,
    pub column_number: u32,
}

impl GraphemePosition {
    /// Derives a grapheme position from a code-unit offset into a line.
    ///
    /// # Panics
    ///
    /// Panics if `line_code_unit` is not a character boundary of
    /// `line_text`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GiB are not supported"
    )]
    pub fn from_line_offset(line_number: u32, line_text: &str, line_code_unit: u32) -> Self {
        let prefix = &line_text[..line_code_unit as usize];
        let column_number = prefix.graphemes(true).count() as u32 + 1;
        Self {
            line_number,
            line_code_unit,
            column_number,
        }
    }
}

impl std::fmt::Display for GraphemePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}, column {}",
            self.line_number, self.column_number
        )
    }
}

/// A line terminator, preserved verbatim.
///
/// `text` is one of `"\n"`, `"\r\n"`, `"\r"`, or `""` (final line only).
/// `code_unit` is the absolute offset at which the terminator begins, which
/// for the final line is the end of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTerminator {
    pub code_unit: u32,
    pub text: EcoString,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_accessors() {
        let span = Span::new(5, 15);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 15);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    fn span_as_range() {
        let range: Range<usize> = Span::new(5, 15).into();
        assert_eq!(range, 5..15);
    }

    #[test]
    fn grapheme_column_ascii() {
        let pos = GraphemePosition::from_line_offset(0, "let x", 4);
        assert_eq!(pos.column_number, 5);
        assert_eq!(pos.line_code_unit, 4);
    }

    #[test]
    fn grapheme_column_at_line_start() {
        let pos = GraphemePosition::from_line_offset(2, "/* open", 0);
        assert_eq!(pos.line_number, 2);
        assert_eq!(pos.column_number, 1);
    }

    #[test]
    fn grapheme_column_combining_mark() {
        // "é" as 'e' + U+0301 is one grapheme cluster (3 code units).
        let line = "e\u{301}x";
        let pos = GraphemePosition::from_line_offset(0, line, 3);
        assert_eq!(pos.column_number, 2);
    }

    #[test]
    fn grapheme_column_zwj_sequence() {
        // Family emoji joined with ZWJ is a single grapheme cluster.
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F466}";
        let line = format!("{family}x");
        #[expect(clippy::cast_possible_truncation, reason = "short test string")]
        let offset = family.len() as u32;
        let pos = GraphemePosition::from_line_offset(0, &line, offset);
        assert_eq!(pos.column_number, 2);
    }

    #[test]
    fn grapheme_position_display() {
        let pos = GraphemePosition {
            line_number: 0,
            line_code_unit: 0,
            column_number: 1,
        };
        assert_eq!(pos.to_string(), "line 0, column 1");
    }
}
