use std::str::Chars;
use std::sync::Arc;

use keel_ir::{Bracket, Name, Position, Token, TokenKind};
use num_bigint::BigInt;
use tracing::trace;

use crate::LexError;

/// Characters that may not appear in a symbol run even though they are
/// ASCII punctuation.
const RESERVED: &[char] = &['(', ')', '[', ']', '{', '}', '"', '\'', '_', '#', ','];

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[inline]
fn is_symbol_char(c: char) -> bool {
    c.is_ascii_punctuation() && !RESERVED.contains(&c)
}

/// The last thing handed out by a cursor, kept so it can be pushed back.
///
/// `None` means nothing has been read yet; `Some(None)` means end of input
/// was read.
struct Pushback<T> {
    last: Option<Option<T>>,
    pending: bool,
}

impl<T> Pushback<T> {
    fn new() -> Self {
        Pushback {
            last: None,
            pending: false,
        }
    }
}

/// Hand-written lexer with one character and one token of pushback.
///
/// Newlines are significant: every `\n` surfaces as [`TokenKind::Eol`], and
/// end of input produces one synthesized `Eol` if the last token was not
/// already one. After that, [`Lexer::next_token`] returns `Ok(None)`.
pub struct Lexer<'src> {
    path: Arc<str>,
    chars: Chars<'src>,
    line: u32,
    column: u32,
    /// Position before the last character read, restored by `unread_char`.
    before_last: (u32, u32),
    char_back: Pushback<char>,
    token_back: Pushback<Token>,
    last_was_eol: bool,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(path: impl Into<Arc<str>>, source: &'src str) -> Self {
        Lexer {
            path: path.into(),
            chars: source.chars(),
            line: 1,
            column: 1,
            before_last: (1, 1),
            char_back: Pushback::new(),
            token_back: Pushback::new(),
            last_was_eol: false,
            finished: false,
        }
    }

    pub fn path(&self) -> &Arc<str> {
        &self.path
    }

    /// Position of the next character to be read.
    pub fn position(&self) -> Position {
        Position::new(Arc::clone(&self.path), self.line, self.column)
    }

    fn advance_position(&mut self, c: Option<char>) {
        self.before_last = (self.line, self.column);
        match c {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
    }

    /// Read one character, or `None` at end of input.
    pub fn next_char(&mut self) -> Option<char> {
        let c = if self.char_back.pending {
            self.char_back.pending = false;
            self.char_back.last.flatten()
        } else {
            let c = self.chars.next();
            self.char_back.last = Some(c);
            c
        };
        self.advance_position(c);
        c
    }

    /// Push the last character read back onto the stream.
    ///
    /// Only one character may be pending at a time.
    pub fn unread_char(&mut self) -> Result<(), LexError> {
        if self.char_back.pending {
            return Err(self.internal("unread_char called twice without a read in between"));
        }
        if self.char_back.last.is_none() {
            return Err(self.internal("unread_char called before any character was read"));
        }
        self.char_back.pending = true;
        (self.line, self.column) = self.before_last;
        Ok(())
    }

    /// Read the next token. `Ok(None)` once the stream is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.token_back.pending {
            self.token_back.pending = false;
            let token = self.token_back.last.clone().flatten();
            trace!(?token, "replaying pushed back token");
            return Ok(token);
        }
        let token = self.scan()?;
        if let Some(tok) = &token {
            self.last_was_eol = tok.kind.is_eol();
        }
        self.token_back.last = Some(token.clone());
        Ok(token)
    }

    /// Push the last token read back onto the stream.
    ///
    /// Only one token may be pending at a time.
    pub fn unread_token(&mut self) -> Result<(), LexError> {
        if self.token_back.pending {
            return Err(self.internal("unread_token called twice without a read in between"));
        }
        if self.token_back.last.is_none() {
            return Err(self.internal("unread_token called before any token was read"));
        }
        trace!("token pushed back");
        self.token_back.pending = true;
        Ok(())
    }

    /// Look at the next token without consuming it.
    ///
    /// Uses the pushback slot, so it must not follow an `unread_token`.
    pub fn peek_token(&mut self) -> Result<Option<Token>, LexError> {
        let token = self.next_token()?;
        self.unread_token()?;
        Ok(token)
    }

    fn internal(&self, message: &'static str) -> LexError {
        LexError::Internal {
            pos: self.position(),
            message,
        }
    }

    fn scan(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            let pos = self.position();
            let Some(c) = self.next_char() else {
                return Ok(self.finish(pos));
            };
            let kind = match c {
                ' ' | '\t' | '\r' | ',' => continue,
                '#' => {
                    self.skip_comment()?;
                    continue;
                }
                '\n' => TokenKind::Eol,
                '(' => TokenKind::Open(Bracket::Paren),
                ')' => TokenKind::Close(Bracket::Paren),
                '{' => TokenKind::Open(Bracket::Brace),
                '}' => TokenKind::Close(Bracket::Brace),
                '[' => TokenKind::Open(Bracket::Square),
                ']' => TokenKind::Close(Bracket::Square),
                '"' => TokenKind::Str(self.string(&pos)?),
                '\'' => match self.next_char() {
                    Some(c) if is_ident_start(c) => TokenKind::Atom(self.identifier(c)?),
                    _ => return Err(LexError::BareQuote { pos }),
                },
                c if c.is_ascii_digit() => TokenKind::Number(self.number(c, &pos)?),
                c if is_ident_start(c) => TokenKind::Ref(self.identifier(c)?),
                c if is_symbol_char(c) => TokenKind::Symbol(self.symbol(c)?),
                found => return Err(LexError::InvalidChar { pos, found }),
            };
            return Ok(Some(Token::new(kind, pos)));
        }
    }

    fn finish(&mut self, pos: Position) -> Option<Token> {
        if self.finished {
            return None;
        }
        self.finished = true;
        if self.last_was_eol {
            None
        } else {
            Some(Token::new(TokenKind::Eol, pos))
        }
    }

    /// Skip to the end of the line, leaving the newline to become an `Eol`.
    fn skip_comment(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.next_char() {
            if c == '\n' {
                return self.unread_char();
            }
        }
        Ok(())
    }

    fn string(&mut self, open: &Position) -> Result<String, LexError> {
        let mut text = String::new();
        loop {
            match self.next_char() {
                None => return Err(LexError::UnterminatedString { pos: open.clone() }),
                Some('"') => return Ok(text),
                Some('\r') => {}
                Some('\\') => match self.next_char() {
                    None => return Err(LexError::UnterminatedString { pos: open.clone() }),
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some(other) => text.push(other),
                },
                Some(c) => text.push(c),
            }
        }
    }

    /// Collect the rest of a run whose first character is `first`.
    fn run_while(&mut self, first: char, pred: fn(char) -> bool) -> Result<String, LexError> {
        let mut text = String::from(first);
        while let Some(c) = self.next_char() {
            if pred(c) {
                text.push(c);
            } else {
                self.unread_char()?;
                return Ok(text);
            }
        }
        Ok(text)
    }

    fn identifier(&mut self, first: char) -> Result<Name, LexError> {
        self.run_while(first, is_ident_continue).map(Name::from)
    }

    fn symbol(&mut self, first: char) -> Result<Name, LexError> {
        self.run_while(first, is_symbol_char).map(Name::from)
    }

    fn number(&mut self, first: char, pos: &Position) -> Result<BigInt, LexError> {
        let text = self.run_while(first, |c| c.is_ascii_digit() || c == '_')?;
        if text.ends_with('_') {
            return Err(LexError::TrailingSeparator {
                pos: pos.clone(),
                text,
            });
        }
        let digits: String = text.chars().filter(|&c| c != '_').collect();
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(LexError::LeadingZero {
                pos: pos.clone(),
                text,
            });
        }
        BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| LexError::Internal {
            pos: pos.clone(),
            message: "digit run failed to parse as an integer",
        })
    }
}

/// Lex a whole source file into a token vector, including the final `Eol`.
pub fn tokenize(path: impl Into<Arc<str>>, source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(path, source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    tracing::debug!(count = tokens.len(), "lexing complete");
    Ok(tokens)
}
