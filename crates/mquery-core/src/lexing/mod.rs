// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for M source code.
//!
//! **DDD Context:** Lexical Analysis
//!
//! The lexer is two-layered. The inner layer, [`lex_line`], classifies one
//! physical line at a time into [`LineToken`]s; a construct that crosses a
//! line boundary (multiline comment, text literal, quoted identifier)
//! becomes a run of start/content/end fragments, and the [`LexMode`]
//! carried from each line's end to the next line's start is what keeps the
//! layers honest. The outer layer, [`LexerSnapshot`], stitches fragments
//! back into whole [`Token`]s and [`Comment`]s with absolute positions.
//!
//! # Incremental updates
//!
//! [`LexerState`] supports editor-style edits ([`LexerState::update_line`],
//! [`LexerState::update_range`], [`LexerState::append_line`],
//! [`LexerState::delete_line`]). An edit relexes only the touched lines
//! plus the trailing lines whose entry mode changed — the cascade stops at
//! the first line whose stored entry mode matches the propagated one.
//!
//! ```
//! use mquery_core::lexing::{LexerState, TokenKind};
//!
//! let state = LexerState::from_text("if x then 1 else 2");
//! let snapshot = state.snapshot().expect("no lex errors");
//! assert_eq!(snapshot.tokens().len(), 6);
//! assert_eq!(snapshot.tokens()[0].kind, TokenKind::KeywordIf);
//! ```
//!
//! # Error Handling
//!
//! Classification errors are captured on their line during incremental
//! lexing and surface all at once when a snapshot is built; see
//! [`LexError`] and [`LexerError`]. Snapshot building never returns a
//! partial result.

mod error;
mod keyword;
mod line;
mod line_lexer;
mod position;
mod snapshot;
mod state;
mod token;


pub use error::{LexError, LexErrorKind, LexerError, LineError, UnterminatedKind};
pub use keyword::{keyword_kind, KEYWORDS};
pub use line::{LexMode, Line, LineKind};
pub use line_lexer::{lex_line, LexedLine};
pub use position::{GraphemePosition, LineTerminator, Position, Span};
pub use snapshot::LexerSnapshot;
pub use state::{EditPosition, EditRange, LexerState};
pub use token::{Comment, CommentKind, LineToken, LineTokenKind, Token, TokenKind};
