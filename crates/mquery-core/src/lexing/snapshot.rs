// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The immutable snapshot handed to the parser.
//!
//! Building a snapshot flattens the state's per-line tokens into absolute
//! positions and stitches multi-line fragments into whole tokens: a
//! `TextLiteralStart`/`…Content`/`…End` run becomes one
//! [`TokenKind::TextLiteral`] token, a quoted-identifier run one
//! [`TokenKind::Identifier`], and comment fragments one [`Comment`]. The
//! parser never sees fragments.
//!
//! A snapshot attempt either yields a fully valid snapshot or an error
//! covering every affected site — partial snapshots are never produced.
//! Snapshots own their text and are safe to share across threads;
//! they remain valid however the originating state is edited afterwards.

use ecow::EcoString;

use super::error::{LexError, LexErrorKind, LexerError, UnterminatedKind};
use super::line::Line;
use super::position::{GraphemePosition, LineTerminator, Position};
use super::state::LexerState;
use super::token::{Comment, CommentKind, LineTokenKind, Token, TokenKind};

/// An immutable, point-in-time tokenization of the full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerSnapshot {
    text: EcoString,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    line_terminators: Vec<LineTerminator>,
}

/// A line token carried to an absolute position during flattening.
#[derive(Debug, Clone)]
struct FlatToken {
    kind: LineTokenKind,
    data: EcoString,
    position_start: Position,
    position_end: Position,
}

impl TryFrom<&LexerState> for LexerSnapshot {
    type Error = LexerError;

    fn try_from(state: &LexerState) -> Result<Self, LexerError> {
        aggregate_line_errors(state)?;
        let (text, flat, line_terminators) = flatten(state);
        let (tokens, comments) = stitch(flat, &text, state.lines())?;
        Ok(Self {
            text: text.into(),
            tokens,
            comments,
            line_terminators,
        })
    }
}

impl LexerSnapshot {
    /// The full source text the snapshot was built from.
    #[must_use]
    pub fn text(&self) -> &EcoString {
        &self.text
    }

    /// The whole tokens, in source order. This is the parser's canonical
    /// stream.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The comments, in source order, associated out-of-band.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Every line's terminator, in order; the final entry has text `""`.
    #[must_use]
    pub fn line_terminators(&self) -> &[LineTerminator] {
        &self.line_terminators
    }

    /// Derives the display position for a position taken from this
    /// snapshot's tokens or comments.
    ///
    /// Returns `None` if the position does not address this snapshot's
    /// text.
    #[must_use]
    pub fn grapheme_position(&self, position: Position) -> Option<GraphemePosition> {
        let terminator = self.line_terminators.get(position.line_number as usize)?;
        let line_start = position.code_unit.checked_sub(position.line_code_unit)?;
        let line_text = self
            .text
            .get(line_start as usize..terminator.code_unit as usize)?;
        if !line_text.is_char_boundary(position.line_code_unit as usize) {
            return None;
        }
        Some(GraphemePosition::from_line_offset(
            position.line_number,
            line_text,
            position.line_code_unit,
        ))
    }
}

/// Collects every stored line error, with grapheme-accurate positions.
fn aggregate_line_errors(state: &LexerState) -> Result<(), LexerError> {
    let mut errors = Vec::new();
    for (line_number, line) in (0u32..).zip(state.lines()) {
        if let Some(error) = line.error() {
            errors.push(error.at_line(line_number, line.text()));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(LexerError::ErrorLines { errors })
    }
}

/// Concatenates line texts and terminators, assigning absolute positions
/// to every line token.
#[expect(
    clippy::cast_possible_truncation,
    reason = "source files over 4GiB are not supported"
)]
fn flatten(state: &LexerState) -> (String, Vec<FlatToken>, Vec<LineTerminator>) {
    let mut text = String::new();
    let mut flat = Vec::new();
    let mut line_terminators = Vec::new();
    let mut offset: u32 = 0;
    for (line_number, line) in (0u32..).zip(state.lines()) {
        for token in line.tokens() {
            flat.push(FlatToken {
                kind: token.kind,
                data: token.data.clone(),
                position_start: Position {
                    code_unit: offset + token.span.start(),
                    line_code_unit: token.span.start(),
                    line_number,
                },
                position_end: Position {
                    code_unit: offset + token.span.end(),
                    line_code_unit: token.span.end(),
                    line_number,
                },
            });
        }
        text.push_str(line.text());
        let terminator_offset = offset + line.text().len() as u32;
        line_terminators.push(LineTerminator {
            code_unit: terminator_offset,
            text: line.line_terminator().clone(),
        });
        text.push_str(line.line_terminator());
        offset = terminator_offset + line.line_terminator().len() as u32;
    }
    (text, flat, line_terminators)
}

/// Walks the flat token stream, pairing fragments into whole tokens and
/// comments.
fn stitch(
    flat: Vec<FlatToken>,
    text: &str,
    lines: &[Line],
) -> Result<(Vec<Token>, Vec<Comment>), LexerError> {
    let mut tokens = Vec::new();
    let mut comments = Vec::new();
    let mut iter = flat.into_iter();
    while let Some(token) = iter.next() {
        match token.kind {
            LineTokenKind::LineComment => comments.push(Comment {
                kind: CommentKind::Line,
                data: token.data,
                contains_newline: true,
                position_start: token.position_start,
                position_end: token.position_end,
            }),
            LineTokenKind::MultilineComment => comments.push(Comment {
                kind: CommentKind::Multiline,
                data: token.data,
                contains_newline: token.position_start.line_number
                    != token.position_end.line_number,
                position_start: token.position_start,
                position_end: token.position_end,
            }),
            LineTokenKind::MultilineCommentStart => {
                let end = collect_fragments(
                    &mut iter,
                    LineTokenKind::MultilineCommentContent,
                    LineTokenKind::MultilineCommentEnd,
                    UnterminatedKind::MultilineComment,
                    &token,
                    lines,
                )?;
                comments.push(Comment {
                    kind: CommentKind::Multiline,
                    data: slice(text, token.position_start, end.position_end),
                    contains_newline: true,
                    position_start: token.position_start,
                    position_end: end.position_end,
                });
            }
            LineTokenKind::TextLiteralStart => {
                let end = collect_fragments(
                    &mut iter,
                    LineTokenKind::TextLiteralContent,
                    LineTokenKind::TextLiteralEnd,
                    UnterminatedKind::Text,
                    &token,
                    lines,
                )?;
                tokens.push(Token {
                    kind: TokenKind::TextLiteral,
                    data: slice(text, token.position_start, end.position_end),
                    position_start: token.position_start,
                    position_end: end.position_end,
                });
            }
            LineTokenKind::QuotedIdentifierStart => {
                let end = collect_fragments(
                    &mut iter,
                    LineTokenKind::QuotedIdentifierContent,
                    LineTokenKind::QuotedIdentifierEnd,
                    UnterminatedKind::QuotedIdentifier,
                    &token,
                    lines,
                )?;
                tokens.push(Token {
                    kind: TokenKind::Identifier,
                    data: slice(text, token.position_start, end.position_end),
                    position_start: token.position_start,
                    position_end: end.position_end,
                });
            }
            kind => match kind.token_kind() {
                Some(token_kind) => tokens.push(Token {
                    kind: token_kind,
                    data: token.data,
                    position_start: token.position_start,
                    position_end: token.position_end,
                }),
                None => {
                    return Err(LexerError::invariant(format!(
                        "stray {kind:?} fragment at offset {}",
                        token.position_start.code_unit
                    )));
                }
            },
        }
    }
    Ok((tokens, comments))
}

/// Consumes contiguous `content` fragments up to the matching `end`
/// fragment.
///
/// Running out of tokens means the construct was still open at the end of
/// the text; any kind other than `content`/`end` in the run is an
/// invariant violation, because the line lexer only ever emits fragments
/// in start/content/end order.
fn collect_fragments(
    iter: &mut impl Iterator<Item = FlatToken>,
    content: LineTokenKind,
    end: LineTokenKind,
    unterminated: UnterminatedKind,
    start: &FlatToken,
    lines: &[Line],
) -> Result<FlatToken, LexerError> {
    loop {
        match iter.next() {
            None => {
                let position = grapheme_position_in_lines(start.position_start, lines);
                return Err(LexError::new(
                    LexErrorKind::UnterminatedMultilineToken(unterminated),
                    position,
                )
                .into());
            }
            Some(token) if token.kind == content => {}
            Some(token) if token.kind == end => return Ok(token),
            Some(token) => {
                return Err(LexerError::invariant(format!(
                    "expected {content:?} or {end:?}, found {:?} at offset {}",
                    token.kind, token.position_start.code_unit
                )));
            }
        }
    }
}

fn grapheme_position_in_lines(position: Position, lines: &[Line]) -> GraphemePosition {
    let line_text = lines
        .get(position.line_number as usize)
        .map_or("", |line| line.text().as_str());
    GraphemePosition::from_line_offset(position.line_number, line_text, position.line_code_unit)
}

fn slice(text: &str, start: Position, end: Position) -> EcoString {
    EcoString::from(&text[start.code_unit as usize..end.code_unit as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::state::{EditPosition, EditRange};

    fn snapshot(text: &str) -> LexerSnapshot {
        LexerState::from_text(text)
            .snapshot()
            .expect("text should lex cleanly")
    }

    #[test]
    fn empty_multiline_comment_on_one_line() {
        let snap = snapshot("/**/");
        assert!(snap.tokens().is_empty());
        assert_eq!(snap.comments().len(), 1);
        let comment = &snap.comments()[0];
        assert_eq!(comment.kind, CommentKind::Multiline);
        assert_eq!(comment.data, "/**/");
        assert!(!comment.contains_newline);
    }

    #[test]
    fn multiline_comment_spanning_lines() {
        let snap = snapshot("/*\n*/");
        assert!(snap.tokens().is_empty());
        let comment = &snap.comments()[0];
        assert_eq!(comment.data, "/*\n*/");
        assert!(comment.contains_newline);
        assert_eq!(comment.position_start.line_number, 0);
        assert_eq!(comment.position_end.line_number, 1);
    }

    #[test]
    fn token_then_stitched_comment() {
        let snap = snapshot("abc /*X\nX\nX*/");
        assert_eq!(snap.tokens().len(), 1);
        assert_eq!(snap.tokens()[0].kind, TokenKind::Identifier);
        assert_eq!(snap.tokens()[0].data, "abc");
        assert_eq!(snap.comments().len(), 1);
        assert_eq!(snap.comments()[0].data, "/*X\nX\nX*/");
        assert!(snap.comments()[0].contains_newline);
    }

    #[test]
    fn quoted_identifier_spanning_lines_unifies_into_identifier() {
        let snap = snapshot("#\"\nfoobar\n\"");
        assert!(snap.comments().is_empty());
        assert_eq!(snap.tokens().len(), 1);
        let token = &snap.tokens()[0];
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.data, "#\"\nfoobar\n\"");
        assert_eq!(token.position_start.line_number, 0);
        assert_eq!(token.position_end.line_number, 2);
    }

    #[test]
    fn text_literal_spanning_lines() {
        let snap = snapshot("\"X\nX\nX\"");
        assert_eq!(snap.tokens().len(), 1);
        let token = &snap.tokens()[0];
        assert_eq!(token.kind, TokenKind::TextLiteral);
        assert_eq!(token.data, "\"X\nX\nX\"");
    }

    #[test]
    fn unterminated_multiline_comment_surfaces_at_its_start() {
        let err = LexerState::from_text("/*\nfoobar\n")
            .snapshot()
            .unwrap_err();
        let LexerError::Lex(lex) = err else {
            panic!("expected a single lex error, got {err:?}");
        };
        assert_eq!(
            lex.kind,
            LexErrorKind::UnterminatedMultilineToken(UnterminatedKind::MultilineComment)
        );
        assert_eq!(lex.position.line_number, 0);
        assert_eq!(lex.position.column_number, 1);
    }

    #[test]
    fn unterminated_text_and_quoted_identifier() {
        let err = LexerState::from_text("\"open\nstill open")
            .snapshot()
            .unwrap_err();
        let LexerError::Lex(lex) = err else {
            panic!("expected a single lex error, got {err:?}");
        };
        assert_eq!(
            lex.kind,
            LexErrorKind::UnterminatedMultilineToken(UnterminatedKind::Text)
        );

        let err = LexerState::from_text("x #\"open\ny").snapshot().unwrap_err();
        let LexerError::Lex(lex) = err else {
            panic!("expected a single lex error, got {err:?}");
        };
        assert_eq!(
            lex.kind,
            LexErrorKind::UnterminatedMultilineToken(UnterminatedKind::QuotedIdentifier)
        );
        assert_eq!(lex.position.line_number, 0);
        // `#` opens at code unit 2 after "x ".
        assert_eq!(lex.position.line_code_unit, 2);
        assert_eq!(lex.position.column_number, 3);
    }

    #[test]
    fn edit_then_append_stitches_across_the_seam() {
        let mut state = LexerState::from_text("let x = 1");
        let at = EditPosition {
            line_number: 0,
            line_code_unit: 8,
        };
        state
            .update_range(EditRange { start: at, end: at }, "/*")
            .unwrap();
        assert_eq!(state.lines()[0].mode_end(), crate::lexing::LexMode::Comment);
        state.append_line("*/");

        let snap = state.snapshot().expect("comment is now closed");
        let kinds: Vec<_> = snap.tokens().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::KeywordLet, TokenKind::Identifier, TokenKind::Equal]
        );
        assert_eq!(snap.comments().len(), 1);
        let comment = &snap.comments()[0];
        assert_eq!(comment.data, "/*1\n*/");
        assert!(comment.contains_newline);
        assert_eq!(comment.position_start.line_number, 0);
        assert_eq!(comment.position_end.line_number, 1);
    }

    #[test]
    fn line_comment_counts_as_containing_newline() {
        let snap = snapshot("x // tail");
        assert_eq!(snap.comments().len(), 1);
        assert_eq!(snap.comments()[0].kind, CommentKind::Line);
        assert!(snap.comments()[0].contains_newline);
    }

    #[test]
    fn multiple_error_lines_are_all_reported() {
        let err = LexerState::from_text("0x\nok\n\u{7}")
            .snapshot()
            .unwrap_err();
        let LexerError::ErrorLines { errors } = err else {
            panic!("expected aggregated errors, got {err:?}");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].position.line_number, 0);
        assert_eq!(errors[0].kind, LexErrorKind::UnexpectedEof);
        assert_eq!(errors[1].position.line_number, 2);
        assert_eq!(errors[1].kind, LexErrorKind::UnexpectedRead);
    }

    #[test]
    fn tokens_and_comments_are_ordered_and_disjoint() {
        let snap = snapshot("1 /*c*/ + 2 // end\n\"x\" & y");
        let mut spans: Vec<(u32, u32)> = snap
            .tokens()
            .iter()
            .map(|t| (t.position_start.code_unit, t.position_end.code_unit))
            .chain(
                snap.comments()
                    .iter()
                    .map(|c| (c.position_start.code_unit, c.position_end.code_unit)),
            )
            .collect();
        spans.sort_unstable();
        for window in spans.windows(2) {
            assert!(
                window[0].1 <= window[1].0,
                "overlapping spans {window:?}"
            );
            assert!(window[0].0 < window[1].0, "non-increasing starts");
        }
    }

    #[test]
    fn flatten_preserves_text_and_terminators() {
        let state = LexerState::from_text("a\r\nb\nc");
        let snap = state.snapshot().unwrap();
        assert_eq!(snap.text(), "a\r\nb\nc");
        let terminators: Vec<_> = snap
            .line_terminators()
            .iter()
            .map(|t| (t.code_unit, t.text.as_str()))
            .collect();
        assert_eq!(terminators, vec![(1, "\r\n"), (4, "\n"), (6, "")]);
    }

    #[test]
    fn empty_text_snapshot() {
        let snap = snapshot("");
        assert!(snap.tokens().is_empty());
        assert!(snap.comments().is_empty());
        assert_eq!(snap.line_terminators().len(), 1);
        assert_eq!(snap.text(), "");
    }

    #[test]
    fn snapshot_outlives_further_edits() {
        let mut state = LexerState::from_text("a + b");
        let snap = state.snapshot().unwrap();
        state.update_line(0, "completely different").unwrap();
        assert_eq!(snap.text(), "a + b");
        assert_eq!(snap.tokens().len(), 3);
    }

    #[test]
    fn grapheme_position_for_token_positions() {
        // "é" as 'e' + combining acute: 3 code units, 1 column.
        let snap = snapshot("\"e\u{301}\" x");
        let literal = &snap.tokens()[0];
        assert_eq!(literal.kind, TokenKind::TextLiteral);
        let start = snap.grapheme_position(literal.position_start).unwrap();
        assert_eq!(start.column_number, 1);
        let end = snap.grapheme_position(literal.position_end).unwrap();
        // Quote, one cluster, quote: the literal ends before column 4.
        assert_eq!(end.column_number, 4);
        assert_eq!(end.line_code_unit, 5);

        let x = &snap.tokens()[1];
        let position = snap.grapheme_position(x.position_start).unwrap();
        assert_eq!(position.column_number, 5);
    }

    #[test]
    fn grapheme_position_on_later_lines() {
        let snap = snapshot("first\nsecond line");
        let second = &snap.tokens()[1];
        assert_eq!(second.data, "second");
        let position = snap.grapheme_position(second.position_start).unwrap();
        assert_eq!(position.line_number, 1);
        assert_eq!(position.column_number, 1);

        let bogus = Position {
            code_unit: 999,
            line_code_unit: 1,
            line_number: 9,
        };
        assert!(snap.grapheme_position(bogus).is_none());
    }
}
