#![allow(clippy::unwrap_used, clippy::expect_used)]

use keel_diagnostic::ErrorCode;
use keel_parse::PrecedenceTable;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn lex_listing_shows_kind_and_position() {
    let listing = lex_listing("t.kl", "x\n").unwrap();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Tokens for 't.kl' (2 tokens):",
            "  Ref(\"x\") @ t.kl:1:1",
            "  Eol @ t.kl:1:2",
        ]
    );
}

#[test]
fn parse_listing_prints_one_statement_per_line() {
    let listing = parse_listing("t.kl", "1 + 2 * 3\nx", &PrecedenceTable::standard()).unwrap();
    assert_eq!(listing, "(+ 1 (* 2 3))\nx\n");
}

#[test]
fn listing_errors_keep_their_codes() {
    let err = lex_listing("t.kl", "\"abc").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E0001);
    let err = parse_listing("t.kl", "1 +", &PrecedenceTable::standard()).unwrap_err();
    assert!(!err.is_internal());
}

#[test]
fn rendered_diagnostic_quotes_the_line() {
    let source = "x = 1\ny = \"abc";
    let err = lex_listing("t.kl", source).unwrap_err();
    let rendered = render_diagnostic(&err.to_diagnostic(), source);
    assert!(rendered.starts_with("error[E0001]: "));
    assert!(rendered.contains("  --> t.kl:2:5\n"));
    assert!(rendered.contains("2 | y = \"abc\n"));
    assert!(rendered.contains("\n  |     ^\n"));
}
