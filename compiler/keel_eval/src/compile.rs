//! Lowering from syntax tree to executable [`Code`].
//!
//! Lowering resolves every reference once: builtin names become direct
//! references to their block, `args` and `recur` become frame accesses, and
//! everything else becomes a namespace lookup. Nothing is validated here;
//! kind and arity errors surface when the code runs.

use std::rc::Rc;

use keel_ir::{Expr, ExprKind, Name, Position, Program};
use keel_patterns::{Namespace, Value};
use keel_stack::ensure_sufficient_stack;

/// Name of the parameter holding the current invocation's arguments.
pub const ARGS: &str = "args";
/// Name of the parameter holding the currently executing block.
pub const RECUR: &str = "recur";

/// Executable form of an expression.
#[derive(Clone, Debug)]
pub enum Code {
    /// A literal: number, string, atom or unit.
    Constant(Value),
    /// Namespace lookup; an unbound name evaluates to its atom.
    Lookup { name: Name, pos: Position },
    /// Direct reference to a builtin block.
    Builtin(Value),
    Args,
    Recur,
    Call {
        callee: Box<Code>,
        args: Vec<Code>,
        pos: Position,
    },
    List(Vec<Code>),
    Block(Rc<BlockCode>),
}

impl Code {
    /// Move uniquely owned subcode into `out`, leaving this node's
    /// containers empty.
    fn detach_children(&mut self, out: &mut Vec<Code>) {
        match self {
            Code::Call { callee, args, .. } => {
                out.push(std::mem::replace(&mut **callee, Code::Args));
                out.append(args);
            }
            Code::List(items) => out.append(items),
            Code::Block(body) => {
                if let Some(body) = Rc::get_mut(body) {
                    out.append(&mut body.statements);
                }
            }
            _ => {}
        }
    }
}

impl Drop for Code {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut code) = pending.pop() {
            code.detach_children(&mut pending);
        }
    }
}

/// Statements of a block literal.
#[derive(Debug)]
pub struct BlockCode {
    pub statements: Vec<Code>,
    pub pos: Position,
}

/// Statements of a whole program.
#[derive(Debug)]
pub struct CompiledProgram {
    pub statements: Vec<Code>,
}

/// Lowers syntax to [`Code`] against a fixed set of builtins.
pub struct Compiler<'b> {
    builtins: &'b Namespace<Value>,
}

impl<'b> Compiler<'b> {
    pub fn new(builtins: &'b Namespace<Value>) -> Self {
        Compiler { builtins }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn compile_program(&self, program: &Program) -> CompiledProgram {
        let statements = program.statements.iter().map(|s| self.compile(s)).collect();
        tracing::debug!(path = %program.path, "compiled program");
        CompiledProgram { statements }
    }

    pub fn compile(&self, expr: &Expr) -> Code {
        ensure_sufficient_stack(|| self.compile_inner(expr))
    }

    fn compile_inner(&self, expr: &Expr) -> Code {
        match &expr.kind {
            ExprKind::Unit => Code::Constant(Value::Unit),
            ExprKind::Number(n) => Code::Constant(Value::number(n.clone())),
            ExprKind::Str(s) => Code::Constant(Value::string(s.as_str())),
            ExprKind::Atom(name) => Code::Constant(Value::Atom(name.clone())),
            ExprKind::Ref(name) => self.reference(name, &expr.pos),
            ExprKind::Call { callee, args } => Code::Call {
                callee: Box::new(self.compile(callee)),
                args: args.iter().map(|a| self.compile(a)).collect(),
                pos: expr.pos.clone(),
            },
            ExprKind::List(items) => Code::List(items.iter().map(|i| self.compile(i)).collect()),
            ExprKind::Block(statements) => Code::Block(Rc::new(BlockCode {
                statements: statements.iter().map(|s| self.compile(s)).collect(),
                pos: expr.pos.clone(),
            })),
        }
    }

    fn reference(&self, name: &Name, pos: &Position) -> Code {
        match name.as_str() {
            ARGS => Code::Args,
            RECUR => Code::Recur,
            _ => match self.builtins.get(name.as_str()) {
                Some(builtin) => Code::Builtin(builtin.clone()),
                None => Code::Lookup {
                    name: name.clone(),
                    pos: pos.clone(),
                },
            },
        }
    }
}
