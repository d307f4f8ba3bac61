//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::fmt::Write as _;

use keel_lexer::{tokenize, LexError};
use keel_parse::{parse, ParseError, PrecedenceTable};

use super::{fail, read_file};

/// The token stream of `source`, one token per line.
pub fn lex_listing(path: &str, source: &str) -> Result<String, LexError> {
    let tokens = tokenize(path, source)?;
    let mut out = format!("Tokens for '{path}' ({} tokens):\n", tokens.len());
    for tok in &tokens {
        let _ = writeln!(out, "  {:?} @ {}", tok.kind, tok.pos);
    }
    Ok(out)
}

/// The parsed program, one s-expression per statement.
pub fn parse_listing(
    path: &str,
    source: &str,
    table: &PrecedenceTable,
) -> Result<String, ParseError> {
    let program = parse(path, source, table)?;
    Ok(format!("{program:?}"))
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    match lex_listing(path, &content) {
        Ok(listing) => print!("{listing}"),
        Err(e) => fail(&e.to_diagnostic(), &content),
    }
}

/// Parse a file with the standard operator table and display the tree.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    match parse_listing(path, &content, &PrecedenceTable::standard()) {
        Ok(listing) => print!("{listing}"),
        Err(e) => fail(&e.to_diagnostic(), &content),
    }
}
