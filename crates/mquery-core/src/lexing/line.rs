// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Physical lines and the lex mode carried between them.
//!
//! The incremental lexer works one physical line at a time. Each [`Line`]
//! stores its text and terminator verbatim (concatenating them over all
//! lines reproduces the input exactly), the tokens found on the line, and
//! the [`LexMode`] at the line's start and end. A line's exit mode is the
//! next line's entry mode; that chain is what makes partial relexing sound.

use ecow::EcoString;

use super::error::LineError;
use super::line_lexer::lex_line;
use super::token::LineToken;

/// The lexer's automaton state at a line boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexMode {
    /// Ordinary token scanning.
    #[default]
    Default,
    /// Inside an open `/* ... */` comment.
    Comment,
    /// Inside an open text literal.
    Text,
    /// Inside an open quoted identifier.
    QuotedIdentifier,
}

impl std::fmt::Display for LexMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Default => "default",
            Self::Comment => "comment",
            Self::Text => "text",
            Self::QuotedIdentifier => "quoted identifier",
        };
        f.write_str(text)
    }
}

/// A line's lex status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Not edited since the initial lex; carries an error.
    Error,
    /// Relexed by the most recent edit; clean.
    Touched,
    /// Relexed by the most recent edit; carries an error.
    TouchedWithError,
    /// Not edited since the initial lex; clean.
    Untouched,
}

/// A physical line: text, terminator, tokens, and boundary modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    kind: LineKind,
    text: EcoString,
    line_terminator: EcoString,
    mode_start: LexMode,
    mode_end: LexMode,
    tokens: Vec<LineToken>,
    error: Option<LineError>,
}

impl Line {
    /// Lexes a line under the given entry mode.
    ///
    /// `touched` selects between the touched and untouched status pairs;
    /// initial lexing passes `false`, edits pass `true`.
    pub(crate) fn lex(
        text: EcoString,
        line_terminator: EcoString,
        mode_start: LexMode,
        touched: bool,
    ) -> Self {
        let lexed = lex_line(&text, mode_start);
        let kind = match (touched, lexed.error.is_some()) {
            (true, true) => LineKind::TouchedWithError,
            (true, false) => LineKind::Touched,
            (false, true) => LineKind::Error,
            (false, false) => LineKind::Untouched,
        };
        Self {
            kind,
            text,
            line_terminator,
            mode_start,
            mode_end: lexed.mode_end,
            tokens: lexed.tokens,
            error: lexed.error,
        }
    }

    pub(crate) fn set_line_terminator(&mut self, line_terminator: impl Into<EcoString>) {
        self.line_terminator = line_terminator.into();
    }

    /// The line's lex status.
    #[must_use]
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// The line's text, without its terminator.
    #[must_use]
    pub fn text(&self) -> &EcoString {
        &self.text
    }

    /// The terminator that followed the line, verbatim (`""` on the final
    /// line).
    #[must_use]
    pub fn line_terminator(&self) -> &EcoString {
        &self.line_terminator
    }

    /// The lex mode at the start of the line.
    #[must_use]
    pub fn mode_start(&self) -> LexMode {
        self.mode_start
    }

    /// The lex mode at the end of the line.
    #[must_use]
    pub fn mode_end(&self) -> LexMode {
        self.mode_end
    }

    /// The tokens found on the line, in source order.
    #[must_use]
    pub fn tokens(&self) -> &[LineToken] {
        &self.tokens
    }

    /// The error captured while lexing the line, if any.
    #[must_use]
    pub fn error(&self) -> Option<&LineError> {
        self.error.as_ref()
    }

    /// Returns `true` if the line carries a lex error.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Splits text into `(line, terminator)` pairs, losslessly.
///
/// `\r\n` is recognized as a single terminator before `\r`-alone or
/// `\n`-alone. The final pair always has terminator `""`, so empty input
/// yields one empty line and input ending in a newline yields a trailing
/// empty line.
pub(crate) fn split_lines(text: &str) -> Vec<(EcoString, EcoString)> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut index = 0;
    while index < bytes.len() {
        let terminator_len = match bytes[index] {
            b'\r' if bytes.get(index + 1) == Some(&b'\n') => 2,
            b'\r' | b'\n' => 1,
            _ => {
                index += 1;
                continue;
            }
        };
        lines.push((
            EcoString::from(&text[start..index]),
            EcoString::from(&text[index..index + terminator_len]),
        ));
        index += terminator_len;
        start = index;
    }
    lines.push((EcoString::from(&text[start..]), EcoString::new()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(lines: &[(EcoString, EcoString)]) -> String {
        lines
            .iter()
            .map(|(text, term)| format!("{text}{term}"))
            .collect()
    }

    #[test]
    fn split_empty() {
        let lines = split_lines("");
        assert_eq!(lines, vec![(EcoString::new(), EcoString::new())]);
    }

    #[test]
    fn split_single_line() {
        let lines = split_lines("let x = 1");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, "let x = 1");
        assert_eq!(lines[0].1, "");
    }

    #[test]
    fn split_mixed_terminators() {
        let lines = split_lines("a\nb\r\nc\rd");
        assert_eq!(
            lines,
            vec![
                ("a".into(), "\n".into()),
                ("b".into(), "\r\n".into()),
                ("c".into(), "\r".into()),
                ("d".into(), "".into()),
            ]
        );
    }

    #[test]
    fn split_trailing_newline_yields_empty_final_line() {
        let lines = split_lines("a\n");
        assert_eq!(
            lines,
            vec![("a".into(), "\n".into()), ("".into(), "".into())]
        );
    }

    #[test]
    fn split_crlf_not_treated_as_two_terminators() {
        let lines = split_lines("\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].1, "\r\n");
    }

    #[test]
    fn split_round_trips() {
        for text in ["", "a", "a\n", "\r\r\n\n", "x\ry\r\nz\n", "a\nb\nc"] {
            assert_eq!(reassemble(&split_lines(text)), text);
        }
    }

    #[test]
    fn lex_marks_touched_and_untouched() {
        let clean = Line::lex("let".into(), "\n".into(), LexMode::Default, false);
        assert_eq!(clean.kind(), LineKind::Untouched);
        let touched = Line::lex("let".into(), "\n".into(), LexMode::Default, true);
        assert_eq!(touched.kind(), LineKind::Touched);

        let bad = Line::lex("\u{7}".into(), "".into(), LexMode::Default, false);
        assert_eq!(bad.kind(), LineKind::Error);
        assert!(bad.has_error());
        let bad_touched = Line::lex("\u{7}".into(), "".into(), LexMode::Default, true);
        assert_eq!(bad_touched.kind(), LineKind::TouchedWithError);
    }
}
