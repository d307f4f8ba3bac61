//! Structural parser.
//!
//! Statements are runs of values and raw operator symbols ending at a newline
//! or at the closing bracket of the enclosing group. A newline directly after
//! a trailing operator continues the run on the next line. Each non-empty run
//! is resolved by the [`OperatorParser`].

use std::sync::Arc;

use keel_ir::{Bracket, Expr, ExprKind, Position, Program, TokenKind};
use keel_lexer::Lexer;
use keel_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::operator::{OperatorParser, RunItem};
use crate::{ParseError, PrecedenceTable};

/// Why a run stopped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum RunEnd {
    Eol,
    Close,
    EndOfInput,
}

pub struct Parser<'src, 't> {
    lexer: Lexer<'src>,
    table: &'t PrecedenceTable,
}

impl<'src, 't> Parser<'src, 't> {
    pub fn new(lexer: Lexer<'src>, table: &'t PrecedenceTable) -> Self {
        Parser { lexer, table }
    }

    /// Parse the whole input as a sequence of top-level statements.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let path = Arc::clone(self.lexer.path());
        let mut statements = Vec::new();
        loop {
            let (run, end) = self.run(None)?;
            if !run.is_empty() {
                statements.push(self.collapse(run)?);
            }
            if end == RunEnd::EndOfInput {
                break;
            }
        }
        debug!(statements = statements.len(), "parsing complete");
        Ok(Program { path, statements })
    }

    /// Collect one run, stopping at `eol`, at `close`, or at end of input.
    ///
    /// End of input inside a bracket group is an error.
    fn run(&mut self, close: Option<Bracket>) -> Result<(Vec<RunItem>, RunEnd), ParseError> {
        let mut items = Vec::new();
        loop {
            let Some(token) = self.lexer.next_token()? else {
                return match close {
                    Some(open) => Err(ParseError::PrematureEnd {
                        pos: self.lexer.position(),
                        open,
                    }),
                    None => Ok((items, RunEnd::EndOfInput)),
                };
            };
            match token.kind {
                TokenKind::Eol => {
                    if matches!(items.last(), Some(RunItem::Operator { .. })) {
                        continue;
                    }
                    return Ok((items, RunEnd::Eol));
                }
                TokenKind::Close(b) if close == Some(b) => {
                    return Ok((items, RunEnd::Close));
                }
                TokenKind::Symbol(symbol) => items.push(RunItem::Operator {
                    symbol,
                    pos: token.pos,
                }),
                _ => {
                    self.lexer.unread_token()?;
                    items.push(RunItem::Expr(self.value()?));
                }
            }
        }
    }

    fn collapse(&self, run: Vec<RunItem>) -> Result<Expr, ParseError> {
        let origin = run
            .first()
            .map_or_else(|| self.lexer.position(), |item| item.pos().clone());
        OperatorParser::new(run, self.table, origin)?.parse()
    }

    /// Statements of a bracket group up to its closing bracket.
    fn group(&mut self, open: Bracket) -> Result<Vec<Expr>, ParseError> {
        let mut statements = Vec::new();
        loop {
            let (run, end) = self.run(Some(open))?;
            if !run.is_empty() {
                statements.push(self.collapse(run)?);
            }
            if end == RunEnd::Close {
                return Ok(statements);
            }
        }
    }

    /// Inside `( ... )`: unit, or exactly one statement.
    #[tracing::instrument(level = "trace", skip_all)]
    fn call_or_value(&mut self, pos: Position) -> Result<Expr, ParseError> {
        let mut statements = self.group(Bracket::Paren)?;
        match statements.len() {
            0 => Ok(Expr::unit(pos)),
            1 => Ok(statements.swap_remove(0)),
            _ => Err(ParseError::MultipleStatements {
                pos: statements[1].pos.clone(),
            }),
        }
    }

    /// Inside `{ ... }`: a block literal.
    #[tracing::instrument(level = "trace", skip_all)]
    fn block(&mut self, pos: Position) -> Result<Expr, ParseError> {
        let statements = self.group(Bracket::Brace)?;
        Ok(Expr::new(ExprKind::Block(statements), pos))
    }

    /// Inside `[ ... ]`: each element is a single value. Operators are not
    /// resolved inside list literals; parenthesize an element to use one.
    #[tracing::instrument(level = "trace", skip_all)]
    fn list(&mut self, pos: Position) -> Result<Expr, ParseError> {
        let mut elements = Vec::new();
        loop {
            let Some(token) = self.lexer.next_token()? else {
                return Err(ParseError::PrematureEnd {
                    pos: self.lexer.position(),
                    open: Bracket::Square,
                });
            };
            match token.kind {
                TokenKind::Eol => {}
                TokenKind::Close(Bracket::Square) => {
                    return Ok(Expr::new(ExprKind::List(elements), pos));
                }
                _ => {
                    self.lexer.unread_token()?;
                    elements.push(self.value()?);
                }
            }
        }
    }

    /// A single token or bracketed group.
    fn value(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.value_inner())
    }

    fn value_inner(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.lexer.next_token()? else {
            return Err(ParseError::ExpectedValue {
                pos: self.lexer.position(),
                found: TokenKind::Eol,
            });
        };
        let pos = token.pos;
        let kind = match token.kind {
            TokenKind::Ref(name) => ExprKind::Ref(name),
            TokenKind::Atom(name) => ExprKind::Atom(name),
            TokenKind::Number(n) => ExprKind::Number(n),
            TokenKind::Str(s) => ExprKind::Str(s),
            TokenKind::Open(Bracket::Paren) => return self.call_or_value(pos),
            TokenKind::Open(Bracket::Brace) => return self.block(pos),
            TokenKind::Open(Bracket::Square) => return self.list(pos),
            found @ TokenKind::Close(_) => return Err(ParseError::UnexpectedToken { pos, found }),
            found @ (TokenKind::Symbol(_) | TokenKind::Eol) => {
                return Err(ParseError::ExpectedValue { pos, found });
            }
        };
        Ok(Expr::new(kind, pos))
    }
}

/// Lex and parse `source` with `table`.
pub fn parse(
    path: impl Into<Arc<str>>,
    source: &str,
    table: &PrecedenceTable,
) -> Result<Program, ParseError> {
    Parser::new(Lexer::new(path, source), table).parse()
}
