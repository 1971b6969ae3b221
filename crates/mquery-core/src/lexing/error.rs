// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the lexer.
//!
//! Lexical errors are values, never unwinding: the line lexer captures at
//! most one [`LineError`] per line, the incremental state stores it on the
//! affected line, and building a snapshot surfaces every stored error at
//! once. Errors integrate with [`miette`] for diagnostic rendering.
//!
//! Invariant violations — impossible states that indicate a bug, and
//! malformed caller coordinates on the editing API — are reported as
//! [`LexerError::Invariant`].

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::position::GraphemePosition;

/// A lexical error with a grapheme-accurate source position.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at {position}")]
#[diagnostic()]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// Where the error was detected.
    pub position: GraphemePosition,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, position: GraphemePosition) -> Self {
        Self { kind, position }
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// The line ended while a token required more input.
    #[error("unexpected end of input while reading a token")]
    UnexpectedEof,

    /// A character that cannot begin any token.
    #[error("unexpected character; no token can start here")]
    UnexpectedRead,

    /// `0x` without a following hexadecimal digit.
    #[error("expected a hexadecimal digit after '0x'")]
    ExpectedHexLiteral,

    /// `#` without a following keyword or quoted identifier.
    #[error("expected a keyword or quoted identifier after '#'")]
    ExpectedKeywordOrIdentifier,

    /// A `.` that begins neither a numeric literal nor `..`/`...`.
    #[error("expected a digit to form a numeric literal")]
    ExpectedNumericLiteral,

    /// A multi-line construct was still open at the end of the text.
    #[error("unterminated {0}")]
    UnterminatedMultilineToken(UnterminatedKind),
}

/// Which multi-line construct was left unterminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnterminatedKind {
    MultilineComment,
    Text,
    QuotedIdentifier,
}

impl std::fmt::Display for UnterminatedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::MultilineComment => "multiline comment",
            Self::Text => "text literal",
            Self::QuotedIdentifier => "quoted identifier",
        };
        f.write_str(text)
    }
}

/// A lexical error as captured by the line lexer, before the containing
/// line's number is known.
///
/// `code_unit` is relative to the start of the line. [`LineError::at_line`]
/// upgrades it to a [`LexError`] once line context is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineError {
    pub kind: LexErrorKind,
    pub code_unit: u32,
}

impl LineError {
    /// Attaches line context, producing a positioned [`LexError`].
    #[must_use]
    pub fn at_line(self, line_number: u32, line_text: &str) -> LexError {
        LexError::new(
            self.kind,
            GraphemePosition::from_line_offset(line_number, line_text, self.code_unit),
        )
    }
}

/// The error surface of snapshotting and of the editing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LexerError {
    /// A single lexical error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    /// One or more lines failed to lex; every affected site is listed.
    #[error("lexing failed on {} line(s)", .errors.len())]
    ErrorLines {
        #[related]
        errors: Vec<LexError>,
    },

    /// An impossible state or malformed caller input. Never expected
    /// during normal operation.
    #[error("lexer invariant violated: {message}")]
    Invariant { message: EcoString },
}

impl LexerError {
    pub(crate) fn invariant(message: impl Into<EcoString>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }
}
