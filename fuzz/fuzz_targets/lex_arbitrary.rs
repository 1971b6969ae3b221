// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for lexer crash safety testing.
//!
//! This target feeds arbitrary byte sequences through full lexing, a
//! derived edit, and snapshot building, and asserts none of it panics.
//! The lexer must handle all input gracefully, capturing errors as values.
//!
//! Invalid UTF-8 bytes are converted via lossy conversion (U+FFFD
//! replacement) so the lexer still gets exercised with unusual character
//! sequences.
//!
//! # Success Criteria
//!
//! The lexer passes fuzzing if:
//! - It never panics on any input (including replacement characters)
//! - Reassembling the state always reproduces the input text
//! - Edited states stay equal to a fresh lex of their reassembled text

#![no_main]

use libfuzzer_sys::fuzz_target;
use mquery_core::lexing::LexerState;

fuzz_target!(|data: &[u8]| {
    // Convert to UTF-8 using lossy conversion so invalid bytes become
    // U+FFFD replacement characters rather than being skipped entirely.
    let source = String::from_utf8_lossy(data);

    let mut state = LexerState::from_text(&source);
    assert_eq!(state.text(), source.as_ref());

    // Snapshotting must never panic, whatever it returns.
    let _ = state.snapshot();

    // Derive a simple edit from the input and check incremental lexing
    // agrees with a fresh lex.
    let line = data.len() % state.lines().len();
    state
        .update_line(line, "x = /* 1")
        .expect("line index is in range");
    let fresh = LexerState::from_text(state.text().as_str());
    assert_eq!(state.lines().len(), fresh.lines().len());
    for (ours, theirs) in state.lines().iter().zip(fresh.lines()) {
        assert_eq!(ours.tokens(), theirs.tokens());
        assert_eq!(ours.mode_end(), theirs.mode_end());
    }
    let _ = state.snapshot();
});
