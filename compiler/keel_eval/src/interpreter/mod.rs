//! Program-level driver: parse, compile, execute.
//!
//! A run starts with an empty namespace. Top-level statements execute in
//! order with the same binding rules as a block body; `args` is the list of
//! program arguments and `recur` is unit. A `return` that escapes every
//! `loop` ends the run, and its value comes back wrapped in `Value::Return`.

mod builder;

pub use builder::InterpreterBuilder;

use std::sync::Arc;

use keel_ir::Program;
use keel_parse::{parse, PrecedenceTable};
use keel_patterns::{EvalContext, EvalError, Flow, Namespace, SharedPrintHandler, Value};

use crate::compile::{CompiledProgram, Compiler};
use crate::errors::RunError;
use crate::exec::Frame;

/// Runs Keel programs against a fixed builtin library and configuration.
pub struct Interpreter {
    print: SharedPrintHandler,
    args: Vec<String>,
    precedence: PrecedenceTable,
    max_depth: usize,
    builtins: Namespace<Value>,
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    pub fn precedence(&self) -> &PrecedenceTable {
        &self.precedence
    }

    /// Parse, compile and run `source`.
    pub fn run_source(&self, path: impl Into<Arc<str>>, source: &str) -> Result<Value, RunError> {
        let program = parse(path, source, &self.precedence)?;
        Ok(self.run_program(&program)?)
    }

    pub fn compile(&self, program: &Program) -> CompiledProgram {
        Compiler::new(&self.builtins).compile_program(program)
    }

    pub fn run_program(&self, program: &Program) -> Result<Value, EvalError> {
        let compiled = self.compile(program);
        self.execute(&compiled)
    }

    /// Execute compiled code, yielding the value of the last statement.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn execute(&self, program: &CompiledProgram) -> Result<Value, EvalError> {
        let ctx = EvalContext::new(Arc::clone(&self.print), self.max_depth);
        let args = Value::list(self.args.iter().map(|a| Value::string(a.as_str())).collect());
        let mut frame = Frame::new(&ctx, Namespace::new(), args, Value::Unit);
        let reply = frame.run_statements(&program.statements)?;
        tracing::debug!(bindings = frame.namespace().len(), "program finished");
        Ok(match reply.flow {
            Flow::Normal(value) => value,
            Flow::Returning(value) => Value::returning(value),
        })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        InterpreterBuilder::new().build()
    }
}
