// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The per-line lexer.
//!
//! [`lex_line`] classifies one physical line into [`LineToken`]s, given the
//! [`LexMode`] in effect at the line's start, and reports the mode in
//! effect at its end. A multi-line construct that opens on the line ends it
//! in a non-default mode; the construct's remaining lines are lexed as
//! `*Content` / `*End` fragments by subsequent calls.
//!
//! `lex_line` is a pure function of `(text, mode_start)`: equal inputs
//! produce structurally equal outputs. Classification errors are captured
//! in the result, never thrown; at most one error is recorded per line and
//! scanning stops at it.

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::error::{LexErrorKind, LineError};
use super::keyword::keyword_kind;
use super::line::LexMode;
use super::position::Span;
use super::token::{LineToken, LineTokenKind};

/// The result of lexing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedLine {
    /// Tokens found on the line, in source order.
    pub tokens: Vec<LineToken>,
    /// The lex mode in effect at the end of the line.
    pub mode_end: LexMode,
    /// The classification error that stopped scanning, if any.
    pub error: Option<LineError>,
}

/// Lexes a single line of source text under the given entry mode.
///
/// `text` must not contain line terminators.
///
/// # Examples
///
/// ```
/// use mquery_core::lexing::{lex_line, LexMode, LineTokenKind};
///
/// let lexed = lex_line("x + 1", LexMode::Default);
/// let kinds: Vec<_> = lexed.tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [
///         LineTokenKind::Identifier,
///         LineTokenKind::Plus,
///         LineTokenKind::NumericLiteral,
///     ]
/// );
/// assert_eq!(lexed.mode_end, LexMode::Default);
/// ```
#[must_use]
pub fn lex_line(text: &str, mode_start: LexMode) -> LexedLine {
    let mut lexer = LineLexer::new(text);
    let mode_end = lexer.run(mode_start);
    LexedLine {
        tokens: lexer.tokens,
        mode_end,
        error: lexer.error,
    }
}

/// Scanner over a single line.
struct LineLexer<'src> {
    /// The line being lexed.
    source: &'src str,
    /// Character iterator with code-unit positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current code-unit position in the line.
    position: usize,
    /// Tokens produced so far.
    tokens: Vec<LineToken>,
    /// First classification error, if any.
    error: Option<LineError>,
}

impl<'src> LineLexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            tokens: Vec::new(),
            error: None,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is the same as
    /// `peek_char`).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        let mut iter = self.chars.clone();
        for _ in 0..n {
            iter.next();
        }
        iter.next().map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current code-unit position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GiB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts line text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Emits a token covering `span`.
    fn push(&mut self, kind: LineTokenKind, span: Span) {
        let data = EcoString::from(self.text_for(span));
        self.tokens.push(LineToken::new(kind, data, span));
    }

    /// Records the line's error. Only the first error is kept; scanning
    /// stops at it.
    fn record_error(&mut self, kind: LexErrorKind, code_unit: u32) {
        if self.error.is_none() {
            self.error = Some(LineError { kind, code_unit });
        }
    }

    /// Lexes the whole line, threading modes across constructs that close
    /// mid-line.
    fn run(&mut self, mode_start: LexMode) -> LexMode {
        let mut mode = mode_start;
        loop {
            mode = match mode {
                LexMode::Default => self.lex_default(),
                LexMode::Comment => self.continue_multiline_comment(),
                LexMode::Text => self.continue_text_literal(),
                LexMode::QuotedIdentifier => self.continue_quoted_identifier(),
            };
            if self.peek_char().is_none() || self.error.is_some() {
                return mode;
            }
            // A continuation closed its construct mid-line; the remainder
            // lexes in default mode.
            debug_assert_eq!(mode, LexMode::Default);
        }
    }

    /// Scans tokens in default mode until end of line, an error, or a
    /// construct that continues onto the next line.
    fn lex_default(&mut self) -> LexMode {
        while self.error.is_none() {
            self.advance_while(|c| c == ' ' || c == '\t');
            let Some(c) = self.peek_char() else { break };
            let start = self.current_position();
            let mode = match c {
                '"' => self.lex_text_literal(start),
                '#' => self.lex_hash(start),
                '/' => self.lex_slash(start),
                '0'..='9' => {
                    self.lex_number(start);
                    LexMode::Default
                }
                c if c.is_alphabetic() || c == '_' => {
                    self.lex_identifier_or_keyword(start);
                    LexMode::Default
                }
                c => {
                    self.lex_operator(c, start);
                    LexMode::Default
                }
            };
            if mode != LexMode::Default {
                return mode;
            }
        }
        LexMode::Default
    }

    /// Lexes an identifier, checking the keyword table after capture.
    fn lex_identifier_or_keyword(&mut self, start: u32) {
        self.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
        let span = self.span_from(start);
        let kind = keyword_kind(self.text_for(span)).unwrap_or(LineTokenKind::Identifier);
        self.push(kind, span);
    }

    /// Lexes a `#` construct: a hash keyword (`#table`) or a quoted
    /// identifier (`#"..."`).
    fn lex_hash(&mut self, start: u32) -> LexMode {
        self.advance(); // #
        match self.peek_char() {
            None => {
                self.record_error(LexErrorKind::UnexpectedEof, self.current_position());
                LexMode::Default
            }
            Some('"') => {
                self.advance(); // opening quote
                if self.scan_text_body() {
                    let span = self.span_from(start);
                    self.push(LineTokenKind::Identifier, span);
                    LexMode::Default
                } else {
                    let span = self.span_from(start);
                    self.push(LineTokenKind::QuotedIdentifierStart, span);
                    LexMode::QuotedIdentifier
                }
            }
            Some(c) if c.is_alphabetic() || c == '_' => {
                self.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
                let span = self.span_from(start);
                match keyword_kind(self.text_for(span)) {
                    Some(kind) => self.push(kind, span),
                    None => self.record_error(LexErrorKind::ExpectedKeywordOrIdentifier, start),
                }
                LexMode::Default
            }
            Some(_) => {
                self.record_error(LexErrorKind::ExpectedKeywordOrIdentifier, start);
                LexMode::Default
            }
        }
    }

    /// Lexes a text literal opened by `"`.
    fn lex_text_literal(&mut self, start: u32) -> LexMode {
        self.advance(); // opening quote
        if self.scan_text_body() {
            let span = self.span_from(start);
            self.push(LineTokenKind::TextLiteral, span);
            LexMode::Default
        } else {
            let span = self.span_from(start);
            self.push(LineTokenKind::TextLiteralStart, span);
            LexMode::Text
        }
    }

    /// Scans the body of a quoted form after its opening quote. A doubled
    /// `""` is an embedded quote, not a terminator. Returns `true` when a
    /// terminating quote was consumed on this line; otherwise the rest of
    /// the line has been consumed.
    fn scan_text_body(&mut self) -> bool {
        loop {
            match self.peek_char() {
                None => return false,
                Some('"') if self.peek_char_n(1) == Some('"') => {
                    self.advance();
                    self.advance();
                }
                Some('"') => {
                    self.advance();
                    return true;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Lexes a `/` construct: line comment, multiline comment, or division.
    fn lex_slash(&mut self, start: u32) -> LexMode {
        self.advance(); // /
        match self.peek_char() {
            Some('/') => {
                self.advance_while(|_| true); // comment runs to end of line
                let span = self.span_from(start);
                self.push(LineTokenKind::LineComment, span);
                LexMode::Default
            }
            Some('*') => {
                self.advance(); // *
                if self.scan_comment_close() {
                    let span = self.span_from(start);
                    self.push(LineTokenKind::MultilineComment, span);
                    LexMode::Default
                } else {
                    let span = self.span_from(start);
                    self.push(LineTokenKind::MultilineCommentStart, span);
                    LexMode::Comment
                }
            }
            _ => {
                let span = self.span_from(start);
                self.push(LineTokenKind::Division, span);
                LexMode::Default
            }
        }
    }

    /// Scans for a closing `*/`. Returns `true` when one was consumed on
    /// this line; otherwise the rest of the line has been consumed.
    fn scan_comment_close(&mut self) -> bool {
        loop {
            match self.peek_char() {
                None => return false,
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    return true;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Lexes a numeric or hexadecimal literal starting with a digit.
    fn lex_number(&mut self, start: u32) {
        if self.peek_char() == Some('0') && matches!(self.peek_char_n(1), Some('x' | 'X')) {
            self.advance(); // 0
            self.advance(); // x
            let digits_start = self.current_position();
            self.advance_while(|c| c.is_ascii_hexdigit());
            if self.current_position() == digits_start {
                if self.peek_char().is_none() {
                    self.record_error(LexErrorKind::UnexpectedEof, digits_start);
                } else {
                    self.record_error(LexErrorKind::ExpectedHexLiteral, start);
                }
                return;
            }
            let span = self.span_from(start);
            self.push(LineTokenKind::HexLiteral, span);
            return;
        }

        self.advance_while(|c| c.is_ascii_digit());
        if self.peek_char() == Some('.') && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_digit());
        }
        self.lex_exponent();
        let span = self.span_from(start);
        self.push(LineTokenKind::NumericLiteral, span);
    }

    /// Lexes a numeric literal that begins with `.` (the caller has seen a
    /// digit after the dot).
    fn lex_leading_dot_number(&mut self, start: u32) {
        self.advance(); // .
        self.advance_while(|c| c.is_ascii_digit());
        self.lex_exponent();
        let span = self.span_from(start);
        self.push(LineTokenKind::NumericLiteral, span);
    }

    /// Consumes an exponent only when at least one digit follows the `e`
    /// (and optional sign), so `1e` lexes as a literal and an identifier.
    fn lex_exponent(&mut self) {
        if !matches!(self.peek_char(), Some('e' | 'E')) {
            return;
        }
        match self.peek_char_n(1) {
            Some(c) if c.is_ascii_digit() => {
                self.advance(); // e
            }
            Some('+' | '-') if self.peek_char_n(2).is_some_and(|c| c.is_ascii_digit()) => {
                self.advance(); // e
                self.advance(); // sign
            }
            _ => return,
        }
        self.advance_while(|c| c.is_ascii_digit());
    }

    /// Lexes an operator or punctuation token. Longest match wins.
    fn lex_operator(&mut self, c: char, start: u32) {
        let kind = match c {
            '(' => {
                self.advance();
                LineTokenKind::LeftParenthesis
            }
            ')' => {
                self.advance();
                LineTokenKind::RightParenthesis
            }
            '[' => {
                self.advance();
                LineTokenKind::LeftBracket
            }
            ']' => {
                self.advance();
                LineTokenKind::RightBracket
            }
            '{' => {
                self.advance();
                LineTokenKind::LeftBrace
            }
            '}' => {
                self.advance();
                LineTokenKind::RightBrace
            }
            ';' => {
                self.advance();
                LineTokenKind::Semicolon
            }
            ',' => {
                self.advance();
                LineTokenKind::Comma
            }
            '@' => {
                self.advance();
                LineTokenKind::AtSign
            }
            '?' => {
                self.advance();
                LineTokenKind::QuestionMark
            }
            '+' => {
                self.advance();
                LineTokenKind::Plus
            }
            '-' => {
                self.advance();
                LineTokenKind::Minus
            }
            '*' => {
                self.advance();
                LineTokenKind::Asterisk
            }
            '&' => {
                self.advance();
                LineTokenKind::Ampersand
            }
            '=' => {
                self.advance();
                if self.peek_char() == Some('>') {
                    self.advance();
                    LineTokenKind::FatArrow
                } else {
                    LineTokenKind::Equal
                }
            }
            '<' => {
                self.advance();
                match self.peek_char() {
                    Some('=') => {
                        self.advance();
                        LineTokenKind::LessThanEqualTo
                    }
                    Some('>') => {
                        self.advance();
                        LineTokenKind::NotEqual
                    }
                    _ => LineTokenKind::LessThan,
                }
            }
            '>' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    LineTokenKind::GreaterThanEqualTo
                } else {
                    LineTokenKind::GreaterThan
                }
            }
            '.' => {
                if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.lex_leading_dot_number(start);
                    return;
                }
                self.advance();
                if self.peek_char() == Some('.') {
                    self.advance();
                    if self.peek_char() == Some('.') {
                        self.advance();
                        LineTokenKind::Ellipsis
                    } else {
                        LineTokenKind::DotDot
                    }
                } else {
                    self.record_error(LexErrorKind::ExpectedNumericLiteral, start);
                    return;
                }
            }
            _ => {
                self.record_error(LexErrorKind::UnexpectedRead, start);
                return;
            }
        };
        let span = self.span_from(start);
        self.push(kind, span);
    }

    /// Continues an open multiline comment at the start of a line.
    fn continue_multiline_comment(&mut self) -> LexMode {
        let start = self.current_position();
        loop {
            match self.peek_char() {
                None => {
                    let span = self.span_from(start);
                    if !span.is_empty() {
                        self.push(LineTokenKind::MultilineCommentContent, span);
                    }
                    return LexMode::Comment;
                }
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    let close_start = self.current_position();
                    if close_start > start {
                        self.push(
                            LineTokenKind::MultilineCommentContent,
                            Span::new(start, close_start),
                        );
                    }
                    self.advance();
                    self.advance();
                    let span = Span::new(close_start, self.current_position());
                    self.push(LineTokenKind::MultilineCommentEnd, span);
                    return LexMode::Default;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Continues an open text literal at the start of a line.
    fn continue_text_literal(&mut self) -> LexMode {
        self.continue_quoted(
            LineTokenKind::TextLiteralContent,
            LineTokenKind::TextLiteralEnd,
            LexMode::Text,
        )
    }

    /// Continues an open quoted identifier at the start of a line.
    fn continue_quoted_identifier(&mut self) -> LexMode {
        self.continue_quoted(
            LineTokenKind::QuotedIdentifierContent,
            LineTokenKind::QuotedIdentifierEnd,
            LexMode::QuotedIdentifier,
        )
    }

    /// Shared continuation for the two quote-delimited constructs.
    fn continue_quoted(
        &mut self,
        content: LineTokenKind,
        end: LineTokenKind,
        open_mode: LexMode,
    ) -> LexMode {
        let start = self.current_position();
        loop {
            match self.peek_char() {
                None => {
                    let span = self.span_from(start);
                    if !span.is_empty() {
                        self.push(content, span);
                    }
                    return open_mode;
                }
                Some('"') if self.peek_char_n(1) == Some('"') => {
                    self.advance();
                    self.advance();
                }
                Some('"') => {
                    let close_start = self.current_position();
                    if close_start > start {
                        self.push(content, Span::new(start, close_start));
                    }
                    self.advance();
                    let span = Span::new(close_start, self.current_position());
                    self.push(end, span);
                    return LexMode::Default;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }
}
