//! Precedence climbing over a flat run of operands and operator symbols.
//!
//! Tight operators (precedence above [`CALL_PRECEDENCE`]) fold first, inside
//! [`OperatorParser::operator`]. What remains between loose operators is a
//! segment of operands joined by implicit application, folded by
//! [`OperatorParser::operator_lower`]. Equal precedence associates left.

use std::iter::Peekable;
use std::vec::IntoIter;

use keel_ir::{Expr, ExprKind, Name, Position};
use tracing::trace;

use crate::error::Misplacement;
use crate::precedence::{PrecedenceTable, CALL_PRECEDENCE};
use crate::ParseError;

/// One element of a run collected by the structural parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunItem {
    Expr(Expr),
    Operator { symbol: Name, pos: Position },
}

impl RunItem {
    pub fn pos(&self) -> &Position {
        match self {
            RunItem::Expr(expr) => &expr.pos,
            RunItem::Operator { pos, .. } => pos,
        }
    }
}

fn describe(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Unit => "unit",
        ExprKind::Atom(_) => "an atom",
        ExprKind::Number(_) => "a number",
        ExprKind::Str(_) => "a string",
        ExprKind::List(_) => "a list",
        ExprKind::Ref(_) | ExprKind::Call { .. } | ExprKind::Block(_) => "a callable",
    }
}

/// Collapse operands by implicit application: the head is called with the
/// rest as arguments.
fn apply(mut operands: Vec<Expr>, origin: &Position) -> Result<Expr, ParseError> {
    match operands.len() {
        0 => Ok(Expr::unit(origin.clone())),
        1 => Ok(operands.swap_remove(0)),
        _ => {
            let args = operands.split_off(1);
            let head = operands.swap_remove(0);
            if !head.is_callable() {
                return Err(ParseError::NotCallable {
                    found: describe(&head.kind),
                    pos: head.pos.clone(),
                });
            }
            let pos = head.pos.clone();
            Ok(Expr::call(head, args, pos))
        }
    }
}

/// Desugar `left <symbol> right` into a two-argument call.
fn infix(symbol: Name, op_pos: Position, left: Expr, right: Expr) -> Expr {
    trace!(%symbol, "folding infix operator");
    let pos = left.pos.clone();
    Expr::call(Expr::reference(symbol, op_pos), vec![left, right], pos)
}

pub struct OperatorParser<'t> {
    items: Peekable<IntoIter<RunItem>>,
    table: &'t PrecedenceTable,
    origin: Position,
}

impl<'t> OperatorParser<'t> {
    /// Validate the run's shape and symbols.
    ///
    /// `origin` positions the unit produced by an empty run.
    pub fn new(
        items: Vec<RunItem>,
        table: &'t PrecedenceTable,
        origin: Position,
    ) -> Result<Self, ParseError> {
        let misplaced = |item: &RunItem, place| match item {
            RunItem::Operator { symbol, pos } => Err(ParseError::MisplacedOperator {
                pos: pos.clone(),
                symbol: symbol.clone(),
                place,
            }),
            RunItem::Expr(_) => Ok(()),
        };
        if let Some(first) = items.first() {
            misplaced(first, Misplacement::Leading)?;
        }
        if let Some(last) = items.last() {
            misplaced(last, Misplacement::Trailing)?;
        }
        for pair in items.windows(2) {
            if matches!(pair[0], RunItem::Operator { .. }) {
                misplaced(&pair[1], Misplacement::Adjacent)?;
            }
        }
        for item in &items {
            if let RunItem::Operator { symbol, pos } = item {
                if !table.contains(symbol.as_str()) {
                    return Err(ParseError::UnknownOperator {
                        pos: pos.clone(),
                        symbol: symbol.clone(),
                    });
                }
            }
        }
        Ok(OperatorParser {
            items: items.into_iter().peekable(),
            table,
            origin,
        })
    }

    /// Resolve the whole run into one expression.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let first = self.segment()?;
        let expr = self.operator_lower(first, i32::MIN)?;
        match self.items.next() {
            None => Ok(expr),
            Some(item) => Err(ParseError::Internal {
                pos: item.pos().clone(),
                message: "operator run not fully consumed",
            }),
        }
    }

    /// Precedence of the operator at the cursor, if the cursor is on one.
    fn peek_precedence(&mut self) -> Result<Option<i32>, ParseError> {
        match self.items.peek() {
            Some(RunItem::Operator { symbol, pos }) => match self.table.get(symbol.as_str()) {
                Some(level) => Ok(Some(level)),
                None => Err(ParseError::Internal {
                    pos: pos.clone(),
                    message: "operator passed validation but has no precedence",
                }),
            },
            _ => Ok(None),
        }
    }

    fn take_operator(&mut self) -> Result<(Name, Position), ParseError> {
        match self.items.next() {
            Some(RunItem::Operator { symbol, pos }) => Ok((symbol, pos)),
            other => Err(self.shape_error(other)),
        }
    }

    fn take_operand(&mut self) -> Result<Expr, ParseError> {
        match self.items.next() {
            Some(RunItem::Expr(expr)) => Ok(expr),
            other => Err(self.shape_error(other)),
        }
    }

    fn shape_error(&self, found: Option<RunItem>) -> ParseError {
        ParseError::Internal {
            pos: found.map_or_else(|| self.origin.clone(), |item| item.pos().clone()),
            message: "operator run lost its operand/operator alternation",
        }
    }

    /// Fold tight operators binding at least as tight as `min` into `left`.
    ///
    /// Returns `left` untouched when the cursor is not on a tight operator.
    /// A strictly tighter operator after the right operand binds into that
    /// operand first.
    fn operator(&mut self, mut left: Expr, min: i32) -> Result<Expr, ParseError> {
        while let Some(level) = self.peek_precedence()? {
            if level <= CALL_PRECEDENCE || level < min {
                break;
            }
            let (symbol, pos) = self.take_operator()?;
            let mut right = self.take_operand()?;
            if matches!(self.peek_precedence()?, Some(next) if next > level) {
                right = self.operator(right, level + 1)?;
            }
            left = infix(symbol, pos, left, right);
        }
        Ok(left)
    }

    /// Operands up to the next loose operator, each tight-folded, joined by
    /// implicit application.
    fn segment(&mut self) -> Result<Expr, ParseError> {
        let mut operands = Vec::new();
        while matches!(self.items.peek(), Some(RunItem::Expr(_))) {
            let operand = self.take_operand()?;
            operands.push(self.operator(operand, CALL_PRECEDENCE)?);
        }
        apply(operands, &self.origin)
    }

    /// Fold loose operators binding at least as tight as `min` into `left`.
    fn operator_lower(&mut self, mut left: Expr, min: i32) -> Result<Expr, ParseError> {
        while let Some(level) = self.peek_precedence()? {
            if level >= CALL_PRECEDENCE || level < min {
                break;
            }
            let (symbol, pos) = self.take_operator()?;
            let mut right = self.segment()?;
            if matches!(self.peek_precedence()?, Some(next) if next > level) {
                right = self.operator_lower(right, level + 1)?;
            }
            left = infix(symbol, pos, left, right);
        }
        Ok(left)
    }
}
