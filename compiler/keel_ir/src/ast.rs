//! Syntax tree.
//!
//! Infix operators do not survive parsing as their own node kind: `a + b`
//! is a [`ExprKind::Call`] whose callee is a synthesized [`ExprKind::Ref`]
//! named `+`. Prefix calls and infix calls therefore share one dispatch path.

use std::fmt;
use std::sync::Arc;

use keel_stack::ensure_sufficient_stack;
use num_bigint::BigInt;

use crate::{Name, Position};

/// Expression node.
#[derive(Clone, Eq, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExprKind {
    /// `()`, or an empty run.
    Unit,
    Ref(Name),
    Atom(Name),
    Number(BigInt),
    Str(String),
    /// Callee is always a `Ref`, `Block`, or `Call`; the parser enforces it.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    List(Vec<Expr>),
    Block(Vec<Expr>),
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Expr { kind, pos }
    }

    pub fn unit(pos: Position) -> Self {
        Expr::new(ExprKind::Unit, pos)
    }

    pub fn reference(name: impl Into<Name>, pos: Position) -> Self {
        Expr::new(ExprKind::Ref(name.into()), pos)
    }

    pub fn call(callee: Expr, args: Vec<Expr>, pos: Position) -> Self {
        Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            pos,
        )
    }

    /// Whether this expression may appear in callee position.
    pub fn is_callable(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Ref(_) | ExprKind::Block(_) | ExprKind::Call { .. }
        )
    }

    /// Compact s-expression form used by `Debug` and parser tests:
    /// `1 + 2 * 3` renders as `(+ 1 (* 2 3))`.
    fn write_sexpr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.write_sexpr_inner(f))
    }

    fn write_sexpr_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Unit => f.write_str("()"),
            ExprKind::Ref(name) => write!(f, "{name}"),
            ExprKind::Atom(name) => write!(f, "'{name}"),
            ExprKind::Number(n) => write!(f, "{n}"),
            ExprKind::Str(s) => write!(f, "{s:?}"),
            ExprKind::Call { callee, args } => {
                f.write_str("(")?;
                callee.write_sexpr(f)?;
                for arg in args {
                    f.write_str(" ")?;
                    arg.write_sexpr(f)?;
                }
                f.write_str(")")
            }
            ExprKind::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    item.write_sexpr(f)?;
                }
                f.write_str("]")
            }
            ExprKind::Block(stmts) => {
                f.write_str("{")?;
                for (i, stmt) in stmts.iter().enumerate() {
                    f.write_str(if i > 0 { "; " } else { " " })?;
                    stmt.write_sexpr(f)?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl ExprKind {
    /// Move direct subexpressions into `out`, leaving `Unit` behind.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        if !matches!(
            self,
            ExprKind::Call { .. } | ExprKind::List(_) | ExprKind::Block(_)
        ) {
            return;
        }
        match std::mem::replace(self, ExprKind::Unit) {
            ExprKind::Call { callee, args } => {
                out.push(*callee);
                out.extend(args);
            }
            ExprKind::List(items) | ExprKind::Block(items) => out.extend(items),
            _ => {}
        }
    }
}

/// Trees as deep as the source is nested are torn down with a work list
/// instead of one native frame per level.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.kind.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.kind.detach_children(&mut pending);
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_sexpr(f)
    }
}

/// A parsed source file: the top-level statements, run in order.
#[derive(Clone, Eq, PartialEq)]
pub struct Program {
    pub path: Arc<str>,
    pub statements: Vec<Expr>,
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{stmt:?}")?;
        }
        Ok(())
    }
}
