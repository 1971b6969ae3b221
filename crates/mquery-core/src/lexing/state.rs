// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The mutable, incrementally-updated lexer state.
//!
//! [`LexerState`] holds the ordered sequence of [`Line`]s. Edits replace a
//! contiguous run of lines and then *cascade*: every following line whose
//! stored entry mode disagrees with the mode propagated out of the edit is
//! relexed, and relexing stops at the first line whose stored entry mode
//! matches — from there on the stored suffix is still valid.
//!
//! The state requires external synchronization; there is no internal
//! locking. Classification errors are captured on their line, never
//! thrown — they surface when a [`LexerSnapshot`](super::LexerSnapshot) is
//! built.
//!
//! # Examples
//!
//! ```
//! use mquery_core::lexing::{LexerState, LexMode};
//!
//! let mut state = LexerState::from_text("let x = 1");
//! state.update_line(0, "let x = /*1").unwrap();
//! assert_eq!(state.lines()[0].mode_end(), LexMode::Comment);
//! state.append_line("*/");
//! assert_eq!(state.lines()[1].mode_end(), LexMode::Default);
//! ```

use ecow::EcoString;
use tracing::{debug, trace};

use super::error::LexerError;
use super::line::{split_lines, LexMode, Line};
use super::snapshot::LexerSnapshot;

/// A position within the state's line/column grid, addressed in code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EditPosition {
    pub line_number: usize,
    pub line_code_unit: usize,
}

/// A half-open range of text to replace, spanning one or more lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRange {
    pub start: EditPosition,
    pub end: EditPosition,
}

/// The incrementally-updated lexer state: an ordered sequence of lexed
/// lines whose boundary modes chain together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerState {
    lines: Vec<Line>,
}

impl LexerState {
    /// Lexes the full text from scratch. The entry mode of the first line
    /// is [`LexMode::Default`].
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let split = split_lines(text);
        let mut lines = Vec::with_capacity(split.len());
        let mut mode = LexMode::Default;
        for (line_text, terminator) in split {
            let line = Line::lex(line_text, terminator, mode, false);
            mode = line.mode_end();
            lines.push(line);
        }
        debug!(lines = lines.len(), "lexed initial text");
        Self { lines }
    }

    /// The lines of the state, in order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Reassembles the full text from line texts and terminators.
    #[must_use]
    pub fn text(&self) -> EcoString {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line.text());
            text.push_str(line.line_terminator());
        }
        text.into()
    }

    /// Builds an immutable snapshot of the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if any line carries a lex error or a multi-line
    /// construct is unterminated at the end of the text.
    pub fn snapshot(&self) -> Result<LexerSnapshot, LexerError> {
        LexerSnapshot::try_from(self)
    }

    /// Appends text as one or more new lines after the current final line.
    ///
    /// The previous final line receives a `"\n"` terminator; the appended
    /// lines lex under its exit mode.
    pub fn append_line(&mut self, text: &str) {
        let mut mode = match self.lines.last_mut() {
            Some(last) => {
                last.set_line_terminator("\n");
                last.mode_end()
            }
            None => LexMode::Default,
        };
        let pieces = split_lines(text);
        let appended = pieces.len();
        for (line_text, terminator) in pieces {
            let line = Line::lex(line_text, terminator, mode, true);
            mode = line.mode_end();
            self.lines.push(line);
        }
        debug!(appended, total = self.lines.len(), "appended line(s)");
    }

    /// Replaces the text of line `line_number` and relexes the affected
    /// suffix. The replacement may contain line terminators, in which case
    /// the line is split into several.
    ///
    /// # Errors
    ///
    /// Returns [`LexerError::Invariant`] if `line_number` is out of range.
    pub fn update_line(&mut self, line_number: usize, text: &str) -> Result<(), LexerError> {
        let Some(line) = self.lines.get(line_number) else {
            return Err(self.bad_line_number(line_number));
        };
        let mut pieces = split_lines(text);
        if let Some(last) = pieces.last_mut() {
            last.1 = line.line_terminator().clone();
        }
        debug!(line_number, pieces = pieces.len(), "updating line");
        self.splice_and_relex(line_number, line_number + 1, pieces);
        Ok(())
    }

    /// Replaces the text covered by `range` with `text` and relexes the
    /// affected suffix.
    ///
    /// # Errors
    ///
    /// Returns [`LexerError::Invariant`] if the range is reversed, out of
    /// range, or addresses an offset inside a multi-code-unit character.
    pub fn update_range(&mut self, range: EditRange, text: &str) -> Result<(), LexerError> {
        self.check_position(range.start)?;
        self.check_position(range.end)?;
        if range.end < range.start {
            return Err(LexerError::invariant("range end precedes range start"));
        }

        let start_line = &self.lines[range.start.line_number];
        let end_line = &self.lines[range.end.line_number];
        let mut combined = String::new();
        combined.push_str(&start_line.text()[..range.start.line_code_unit]);
        combined.push_str(text);
        combined.push_str(&end_line.text()[range.end.line_code_unit..]);
        let final_terminator = end_line.line_terminator().clone();

        let mut pieces = split_lines(&combined);
        if let Some(last) = pieces.last_mut() {
            last.1 = final_terminator;
        }
        debug!(
            start_line = range.start.line_number,
            end_line = range.end.line_number,
            pieces = pieces.len(),
            "updating range"
        );
        self.splice_and_relex(range.start.line_number, range.end.line_number + 1, pieces);
        Ok(())
    }

    /// Removes line `line_number` and relexes the affected suffix.
    ///
    /// Deleting the final line moves its absent terminator onto the new
    /// final line; deleting the only line leaves a single empty line.
    ///
    /// # Errors
    ///
    /// Returns [`LexerError::Invariant`] if `line_number` is out of range.
    pub fn delete_line(&mut self, line_number: usize) -> Result<(), LexerError> {
        if line_number >= self.lines.len() {
            return Err(self.bad_line_number(line_number));
        }
        let was_last = line_number + 1 == self.lines.len();
        self.lines.remove(line_number);
        debug!(line_number, remaining = self.lines.len(), "deleted line");

        if self.lines.is_empty() {
            self.lines.push(Line::lex(
                EcoString::new(),
                EcoString::new(),
                LexMode::Default,
                true,
            ));
            return Ok(());
        }
        if was_last {
            // The new final line takes over the absent terminator. Its
            // tokens and modes are unaffected.
            let index = self.lines.len() - 1;
            self.lines[index].set_line_terminator("");
            return Ok(());
        }
        let mode = if line_number == 0 {
            LexMode::Default
        } else {
            self.lines[line_number - 1].mode_end()
        };
        self.cascade(line_number, mode);
        Ok(())
    }

    fn bad_line_number(&self, line_number: usize) -> LexerError {
        LexerError::invariant(format!(
            "line {line_number} out of range ({} lines)",
            self.lines.len()
        ))
    }

    fn check_position(&self, position: EditPosition) -> Result<(), LexerError> {
        let Some(line) = self.lines.get(position.line_number) else {
            return Err(self.bad_line_number(position.line_number));
        };
        if !line.text().is_char_boundary(position.line_code_unit) {
            return Err(LexerError::invariant(format!(
                "offset {} is not a character boundary of line {}",
                position.line_code_unit, position.line_number
            )));
        }
        Ok(())
    }

    /// Replaces `lines[start..end]` with freshly lexed `pieces`, threading
    /// the entry mode from the line before `start`, then cascades.
    fn splice_and_relex(
        &mut self,
        start: usize,
        end: usize,
        pieces: Vec<(EcoString, EcoString)>,
    ) {
        let mut mode = if start == 0 {
            LexMode::Default
        } else {
            self.lines[start - 1].mode_end()
        };
        let replacement: Vec<Line> = pieces
            .into_iter()
            .map(|(text, terminator)| {
                let line = Line::lex(text, terminator, mode, true);
                mode = line.mode_end();
                line
            })
            .collect();
        let inserted = replacement.len();
        let _ = self.lines.splice(start..end, replacement);
        self.cascade(start + inserted, mode);
    }

    /// Relexes lines from `start` while their stored entry mode disagrees
    /// with the propagated mode; stops at the first line whose stored
    /// entry mode matches.
    fn cascade(&mut self, start: usize, mut mode: LexMode) {
        let mut index = start;
        while index < self.lines.len() {
            if self.lines[index].mode_start() == mode {
                break;
            }
            let line = &self.lines[index];
            let relexed = Line::lex(
                line.text().clone(),
                line.line_terminator().clone(),
                mode,
                true,
            );
            mode = relexed.mode_end();
            self.lines[index] = relexed;
            index += 1;
        }
        trace!(start, relexed = index - start, "cascade settled");
    }
}
