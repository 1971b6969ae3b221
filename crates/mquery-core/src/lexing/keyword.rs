// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The M keyword table.
//!
//! Keywords come in two families: plain word keywords (`and`, `let`, …)
//! and `#`-prefixed constructor keywords (`#table`, `#duration`, …).
//! `#sections` and `#shared` are distinct keywords.

use super::token::LineTokenKind;

/// Every M keyword, in table order.
pub const KEYWORDS: [&str; 32] = [
    "and",
    "as",
    "each",
    "else",
    "error",
    "false",
    "if",
    "in",
    "is",
    "let",
    "meta",
    "not",
    "null",
    "or",
    "otherwise",
    "section",
    "shared",
    "then",
    "true",
    "try",
    "type",
    "#binary",
    "#date",
    "#datetime",
    "#datetimezone",
    "#duration",
    "#infinity",
    "#nan",
    "#sections",
    "#shared",
    "#table",
    "#time",
];

/// Looks up the keyword kind for a lexeme, if the lexeme is a keyword.
#[must_use]
pub fn keyword_kind(lexeme: &str) -> Option<LineTokenKind> {
    let kind = match lexeme {
        "and" => LineTokenKind::KeywordAnd,
        "as" => LineTokenKind::KeywordAs,
        "each" => LineTokenKind::KeywordEach,
        "else" => LineTokenKind::KeywordElse,
        "error" => LineTokenKind::KeywordError,
        "false" => LineTokenKind::KeywordFalse,
        "if" => LineTokenKind::KeywordIf,
        "in" => LineTokenKind::KeywordIn,
        "is" => LineTokenKind::KeywordIs,
        "let" => LineTokenKind::KeywordLet,
        "meta" => LineTokenKind::KeywordMeta,
        "not" => LineTokenKind::KeywordNot,
        "null" => LineTokenKind::KeywordNull,
        "or" => LineTokenKind::KeywordOr,
        "otherwise" => LineTokenKind::KeywordOtherwise,
        "section" => LineTokenKind::KeywordSection,
        "shared" => LineTokenKind::KeywordShared,
        "then" => LineTokenKind::KeywordThen,
        "true" => LineTokenKind::KeywordTrue,
        "try" => LineTokenKind::KeywordTry,
        "type" => LineTokenKind::KeywordType,
        "#binary" => LineTokenKind::KeywordHashBinary,
        "#date" => LineTokenKind::KeywordHashDate,
        "#datetime" => LineTokenKind::KeywordHashDateTime,
        "#datetimezone" => LineTokenKind::KeywordHashDateTimeZone,
        "#duration" => LineTokenKind::KeywordHashDuration,
        "#infinity" => LineTokenKind::KeywordHashInfinity,
        "#nan" => LineTokenKind::KeywordHashNan,
        "#sections" => LineTokenKind::KeywordHashSections,
        "#shared" => LineTokenKind::KeywordHashShared,
        "#table" => LineTokenKind::KeywordHashTable,
        "#time" => LineTokenKind::KeywordHashTime,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::line_lexer::lex_line;
    use crate::lexing::LexMode;

    #[test]
    fn every_table_entry_has_a_kind() {
        for keyword in KEYWORDS {
            assert!(
                keyword_kind(keyword).is_some(),
                "{keyword} missing from lookup"
            );
        }
    }

    #[test]
    fn non_keywords_miss() {
        assert_eq!(keyword_kind("lets"), None);
        assert_eq!(keyword_kind("Let"), None);
        assert_eq!(keyword_kind("#tables"), None);
        assert_eq!(keyword_kind(""), None);
    }

    #[test]
    fn sections_and_shared_are_distinct() {
        assert_ne!(keyword_kind("#sections"), keyword_kind("#shared"));
        assert_ne!(keyword_kind("shared"), keyword_kind("#shared"));
    }

    /// Every keyword re-lexed in isolation yields its own kind back.
    #[test]
    fn keywords_lex_to_their_kind() {
        for keyword in KEYWORDS {
            let lexed = lex_line(keyword, LexMode::Default);
            assert!(lexed.error.is_none(), "{keyword} produced an error");
            assert_eq!(lexed.tokens.len(), 1, "{keyword} produced extra tokens");
            assert_eq!(Some(lexed.tokens[0].kind), keyword_kind(keyword));
            assert_eq!(lexed.tokens[0].data, keyword);
        }
    }
}
