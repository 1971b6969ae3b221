// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for M lexical analysis.
//!
//! Two token vocabularies live here:
//!
//! - [`LineTokenKind`] / [`LineToken`] — tokens confined to a single
//!   physical line. A construct that continues past the end of a line is
//!   represented by `*Start` / `*Content` / `*End` fragment kinds, one
//!   fragment per line.
//! - [`TokenKind`] / [`Token`] — whole tokens as the parser sees them.
//!   Fragment kinds never appear; a stitched multi-line text literal is a
//!   single [`TokenKind::TextLiteral`], a stitched quoted identifier a
//!   single [`TokenKind::Identifier`], and comments are emitted out-of-band
//!   as [`Comment`] values.
//!
//! The line-token vocabulary is a strict superset of the whole-token one.
//! [`LineTokenKind::token_kind`] spells the projection out with an
//! exhaustive match; there is no numeric reinterpretation between the two
//! enums.

use ecow::EcoString;

use super::position::{Position, Span};

/// The kind of a line token.
///
/// Closed set. Keyword kinds exist per keyword so the parser can match on
/// them directly; the lexeme is still carried in [`LineToken::data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineTokenKind {
    // === Open classes ===
    /// An identifier: `foo`, `Table.FromRows`, `#"quoted name"` (when the
    /// quoted form closes on the same line).
    Identifier,
    /// A decimal numeric literal: `1`, `1.5`, `.5`, `1.5e-3`
    NumericLiteral,
    /// A hexadecimal literal: `0xBEEF`
    HexLiteral,
    /// A text literal that opens and closes on one line: `"abc"`, `"a""b"`
    TextLiteral,

    // === Keywords ===
    KeywordAnd,
    KeywordAs,
    KeywordEach,
    KeywordElse,
    KeywordError,
    KeywordFalse,
    KeywordIf,
    KeywordIn,
    KeywordIs,
    KeywordLet,
    KeywordMeta,
    KeywordNot,
    KeywordNull,
    KeywordOr,
    KeywordOtherwise,
    KeywordSection,
    KeywordShared,
    KeywordThen,
    KeywordTrue,
    KeywordTry,
    KeywordType,
    KeywordHashBinary,
    KeywordHashDate,
    KeywordHashDateTime,
    KeywordHashDateTimeZone,
    KeywordHashDuration,
    KeywordHashInfinity,
    KeywordHashNan,
    KeywordHashSections,
    KeywordHashShared,
    KeywordHashTable,
    KeywordHashTime,

    // === Operators and punctuation ===
    /// `&`
    Ampersand,
    /// `*`
    Asterisk,
    /// `@`
    AtSign,
    /// `,`
    Comma,
    /// `/`
    Division,
    /// `..`
    DotDot,
    /// `...`
    Ellipsis,
    /// `=`
    Equal,
    /// `=>`
    FatArrow,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqualTo,
    /// `{`
    LeftBrace,
    /// `[`
    LeftBracket,
    /// `(`
    LeftParenthesis,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqualTo,
    /// `-`
    Minus,
    /// `<>`
    NotEqual,
    /// `+`
    Plus,
    /// `?`
    QuestionMark,
    /// `}`
    RightBrace,
    /// `]`
    RightBracket,
    /// `)`
    RightParenthesis,
    /// `;`
    Semicolon,

    // === Comments ===
    /// A line comment: `// ...` (runs to end of line)
    LineComment,
    /// A multiline comment that opens and closes on one line: `/* ... */`
    MultilineComment,

    // === Multi-line fragments ===
    /// `/*` with no closing `*/` on the same line; covers the rest of the line.
    MultilineCommentStart,
    /// A full line inside an open multiline comment.
    MultilineCommentContent,
    /// The closing `*/` of a multiline comment.
    MultilineCommentEnd,
    /// `"` with no un-doubled closing quote on the same line.
    TextLiteralStart,
    /// A full line inside an open text literal.
    TextLiteralContent,
    /// The closing `"` of a multi-line text literal.
    TextLiteralEnd,
    /// `#"` with no closing quote on the same line.
    QuotedIdentifierStart,
    /// A full line inside an open quoted identifier.
    QuotedIdentifierContent,
    /// The closing `"` of a multi-line quoted identifier.
    QuotedIdentifierEnd,
}

impl LineTokenKind {
    /// Projects this line-token kind onto the whole-token vocabulary.
    ///
    /// Returns `None` for comment kinds and multi-line fragment kinds:
    /// comments never become tokens, and fragments only reach the parser
    /// after stitching (as [`TokenKind::TextLiteral`] or
    /// [`TokenKind::Identifier`]).
    #[must_use]
    pub const fn token_kind(self) -> Option<TokenKind> {
        match self {
            Self::Identifier => Some(TokenKind::Identifier),
            Self::NumericLiteral => Some(TokenKind::NumericLiteral),
            Self::HexLiteral => Some(TokenKind::HexLiteral),
            Self::TextLiteral => Some(TokenKind::TextLiteral),
            Self::KeywordAnd => Some(TokenKind::KeywordAnd),
            Self::KeywordAs => Some(TokenKind::KeywordAs),
            Self::KeywordEach => Some(TokenKind::KeywordEach),
            Self::KeywordElse => Some(TokenKind::KeywordElse),
            Self::KeywordError => Some(TokenKind::KeywordError),
            Self::KeywordFalse => Some(TokenKind::KeywordFalse),
            Self::KeywordIf => Some(TokenKind::KeywordIf),
            Self::KeywordIn => Some(TokenKind::KeywordIn),
            Self::KeywordIs => Some(TokenKind::KeywordIs),
            Self::KeywordLet => Some(TokenKind::KeywordLet),
            Self::KeywordMeta => Some(TokenKind::KeywordMeta),
            Self::KeywordNot => Some(TokenKind::KeywordNot),
            Self::KeywordNull => Some(TokenKind::KeywordNull),
            Self::KeywordOr => Some(TokenKind::KeywordOr),
            Self::KeywordOtherwise => Some(TokenKind::KeywordOtherwise),
            Self::KeywordSection => Some(TokenKind::KeywordSection),
            Self::KeywordShared => Some(TokenKind::KeywordShared),
            Self::KeywordThen => Some(TokenKind::KeywordThen),
            Self::KeywordTrue => Some(TokenKind::KeywordTrue),
            Self::KeywordTry => Some(TokenKind::KeywordTry),
            Self::KeywordType => Some(TokenKind::KeywordType),
            Self::KeywordHashBinary => Some(TokenKind::KeywordHashBinary),
            Self::KeywordHashDate => Some(TokenKind::KeywordHashDate),
            Self::KeywordHashDateTime => Some(TokenKind::KeywordHashDateTime),
            Self::KeywordHashDateTimeZone => Some(TokenKind::KeywordHashDateTimeZone),
            Self::KeywordHashDuration => Some(TokenKind::KeywordHashDuration),
            Self::KeywordHashInfinity => Some(TokenKind::KeywordHashInfinity),
            Self::KeywordHashNan => Some(TokenKind::KeywordHashNan),
            Self::KeywordHashSections => Some(TokenKind::KeywordHashSections),
            Self::KeywordHashShared => Some(TokenKind::KeywordHashShared),
            Self::KeywordHashTable => Some(TokenKind::KeywordHashTable),
            Self::KeywordHashTime => Some(TokenKind::KeywordHashTime),
            Self::Ampersand => Some(TokenKind::Ampersand),
            Self::Asterisk => Some(TokenKind::Asterisk),
            Self::AtSign => Some(TokenKind::AtSign),
            Self::Comma => Some(TokenKind::Comma),
            Self::Division => Some(TokenKind::Division),
            Self::DotDot => Some(TokenKind::DotDot),
            Self::Ellipsis => Some(TokenKind::Ellipsis),
            Self::Equal => Some(TokenKind::Equal),
            Self::FatArrow => Some(TokenKind::FatArrow),
            Self::GreaterThan => Some(TokenKind::GreaterThan),
            Self::GreaterThanEqualTo => Some(TokenKind::GreaterThanEqualTo),
            Self::LeftBrace => Some(TokenKind::LeftBrace),
            Self::LeftBracket => Some(TokenKind::LeftBracket),
            Self::LeftParenthesis => Some(TokenKind::LeftParenthesis),
            Self::LessThan => Some(TokenKind::LessThan),
            Self::LessThanEqualTo => Some(TokenKind::LessThanEqualTo),
            Self::Minus => Some(TokenKind::Minus),
            Self::NotEqual => Some(TokenKind::NotEqual),
            Self::Plus => Some(TokenKind::Plus),
            Self::QuestionMark => Some(TokenKind::QuestionMark),
            Self::RightBrace => Some(TokenKind::RightBrace),
            Self::RightBracket => Some(TokenKind::RightBracket),
            Self::RightParenthesis => Some(TokenKind::RightParenthesis),
            Self::Semicolon => Some(TokenKind::Semicolon),
            Self::LineComment
            | Self::MultilineComment
            | Self::MultilineCommentStart
            | Self::MultilineCommentContent
            | Self::MultilineCommentEnd
            | Self::TextLiteralStart
            | Self::TextLiteralContent
            | Self::TextLiteralEnd
            | Self::QuotedIdentifierStart
            | Self::QuotedIdentifierContent
            | Self::QuotedIdentifierEnd => None,
        }
    }

    /// Returns `true` if this is a multi-line fragment kind.
    #[must_use]
    pub const fn is_fragment(self) -> bool {
        matches!(
            self,
            Self::MultilineCommentStart
                | Self::MultilineCommentContent
                | Self::MultilineCommentEnd
                | Self::TextLiteralStart
                | Self::TextLiteralContent
                | Self::TextLiteralEnd
                | Self::QuotedIdentifierStart
                | Self::QuotedIdentifierContent
                | Self::QuotedIdentifierEnd
        )
    }

    /// Returns `true` if this fragment opens a multi-line construct.
    #[must_use]
    pub const fn is_fragment_start(self) -> bool {
        matches!(
            self,
            Self::MultilineCommentStart | Self::TextLiteralStart | Self::QuotedIdentifierStart
        )
    }
}

/// The kind of a whole token, as consumed by the parser.
///
/// Mirrors the single-line subset of [`LineTokenKind`]. Quoted identifiers
/// unify into [`TokenKind::Identifier`]; multi-line text literals into
/// [`TokenKind::TextLiteral`]; comments are not tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    NumericLiteral,
    HexLiteral,
    TextLiteral,
    KeywordAnd,
    KeywordAs,
    KeywordEach,
    KeywordElse,
    KeywordError,
    KeywordFalse,
    KeywordIf,
    KeywordIn,
    KeywordIs,
    KeywordLet,
    KeywordMeta,
    KeywordNot,
    KeywordNull,
    KeywordOr,
    KeywordOtherwise,
    KeywordSection,
    KeywordShared,
    KeywordThen,
    KeywordTrue,
    KeywordTry,
    KeywordType,
    KeywordHashBinary,
    KeywordHashDate,
    KeywordHashDateTime,
    KeywordHashDateTimeZone,
    KeywordHashDuration,
    KeywordHashInfinity,
    KeywordHashNan,
    KeywordHashSections,
    KeywordHashShared,
    KeywordHashTable,
    KeywordHashTime,
    Ampersand,
    Asterisk,
    AtSign,
    Comma,
    Division,
    DotDot,
    Ellipsis,
    Equal,
    FatArrow,
    GreaterThan,
    GreaterThanEqualTo,
    LeftBrace,
    LeftBracket,
    LeftParenthesis,
    LessThan,
    LessThanEqualTo,
    Minus,
    NotEqual,
    Plus,
    QuestionMark,
    RightBrace,
    RightBracket,
    RightParenthesis,
    Semicolon,
}

impl TokenKind {
    /// Returns `true` if this is a keyword kind.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::KeywordAnd
                | Self::KeywordAs
                | Self::KeywordEach
                | Self::KeywordElse
                | Self::KeywordError
                | Self::KeywordFalse
                | Self::KeywordIf
                | Self::KeywordIn
                | Self::KeywordIs
                | Self::KeywordLet
                | Self::KeywordMeta
                | Self::KeywordNot
                | Self::KeywordNull
                | Self::KeywordOr
                | Self::KeywordOtherwise
                | Self::KeywordSection
                | Self::KeywordShared
                | Self::KeywordThen
                | Self::KeywordTrue
                | Self::KeywordTry
                | Self::KeywordType
                | Self::KeywordHashBinary
                | Self::KeywordHashDate
                | Self::KeywordHashDateTime
                | Self::KeywordHashDateTimeZone
                | Self::KeywordHashDuration
                | Self::KeywordHashInfinity
                | Self::KeywordHashNan
                | Self::KeywordHashSections
                | Self::KeywordHashShared
                | Self::KeywordHashTable
                | Self::KeywordHashTime
        )
    }

    /// Returns `true` if this token is a literal value.
    ///
    /// Identifiers are names that reference values, not literals.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumericLiteral | Self::HexLiteral | Self::TextLiteral
        )
    }
}

/// A token confined to a single physical line.
///
/// Positions in [`LineToken::span`] are relative to the start of the
/// containing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineToken {
    pub kind: LineTokenKind,
    /// The token's source text, verbatim.
    pub data: EcoString,
    pub span: Span,
}

impl LineToken {
    #[must_use]
    pub fn new(kind: LineTokenKind, data: impl Into<EcoString>, span: Span) -> Self {
        Self {
            kind,
            data: data.into(),
            span,
        }
    }
}

/// A whole token with absolute source positions, possibly spanning lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The token's source text, verbatim, including any embedded line
    /// terminators for multi-line text literals and quoted identifiers.
    pub data: EcoString,
    pub position_start: Position,
    pub position_end: Position,
}

/// The kind of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Multiline,
}

impl std::fmt::Display for CommentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Line => "line comment",
            Self::Multiline => "multiline comment",
        };
        f.write_str(text)
    }
}

/// A comment, emitted out-of-band from the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    /// The comment's source text, verbatim.
    pub data: EcoString,
    pub contains_newline: bool,
    pub position_start: Position,
    pub position_end: Position,
}
