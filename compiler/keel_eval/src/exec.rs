//! Tree-walking execution of [`Code`].
//!
//! Every evaluation yields a [`Reply`]: the value plus any bindings it
//! introduced. Whoever consumes a reply merges its bindings into the active
//! namespace before evaluating anything else, so `x = 5` makes `x` visible
//! to the next argument or statement. A `Returning` flow is handed up
//! untouched until a `loop` absorbs it.

use keel_patterns::errors::not_callable;
use keel_patterns::{
    BlockValue, CompiledBody, EvalContext, EvalError, Flow, Namespace, Reply, Value,
};
use keel_stack::ensure_sufficient_stack;

use crate::compile::{BlockCode, Code};

/// Evaluation state of one block invocation, or of the program itself.
pub(crate) struct Frame<'c> {
    ctx: &'c EvalContext,
    ns: Namespace<Value>,
    /// Value of `args`.
    args: Value,
    /// Value of `recur`.
    this: Value,
}

/// Early exit from a sequence of evaluations.
enum Step {
    Value(Value),
    Returning(Value),
}

impl<'c> Frame<'c> {
    pub(crate) fn new(ctx: &'c EvalContext, ns: Namespace<Value>, args: Value, this: Value) -> Self {
        Frame { ctx, ns, args, this }
    }

    pub(crate) fn namespace(&self) -> &Namespace<Value> {
        &self.ns
    }

    /// Merge `reply`'s bindings and unwrap its value, or surface its
    /// returning flow.
    fn absorb(&mut self, reply: Reply) -> Result<Step, EvalError> {
        if let Some(bindings) = &reply.bindings {
            self.ns = self.ns.with_bindings(bindings)?;
        }
        Ok(match reply.flow {
            Flow::Normal(v) => Step::Value(v),
            Flow::Returning(v) => Step::Returning(v),
        })
    }

    /// Run statements in order, merging the bindings of all but the last.
    /// The last statement's reply is returned as is.
    pub(crate) fn run_statements(&mut self, statements: &[Code]) -> Result<Reply, EvalError> {
        let Some((last, init)) = statements.split_last() else {
            return Ok(Reply::unit());
        };
        for statement in init {
            let reply = self.eval(statement)?;
            if let Step::Returning(v) = self.absorb(reply)? {
                return Ok(Reply::returning(v));
            }
        }
        self.eval(last)
    }

    pub(crate) fn eval(&mut self, code: &Code) -> Result<Reply, EvalError> {
        ensure_sufficient_stack(|| self.eval_inner(code))
    }

    fn eval_inner(&mut self, code: &Code) -> Result<Reply, EvalError> {
        match code {
            Code::Constant(v) | Code::Builtin(v) => Ok(Reply::value(v.clone())),
            Code::Lookup { name, pos } => Ok(Reply::value(match self.ns.get(name.as_str()) {
                Some(v) => v.clone(),
                None => {
                    tracing::trace!(%name, %pos, "unbound name evaluates to atom");
                    Value::Atom(name.clone())
                }
            })),
            Code::Args => Ok(Reply::value(self.args.clone())),
            Code::Recur => Ok(Reply::value(self.this.clone())),
            Code::List(items) => Ok(match self.eval_all(items)? {
                Ok(values) => Reply::value(Value::list(values)),
                Err(returned) => Reply::returning(returned),
            }),
            Code::Block(body) => Ok(Reply::value(Value::block(BlockValue::compiled(
                self.ns.clone(),
                body.clone(),
            )))),
            Code::Call { callee, args, pos } => {
                let reply = self.eval(callee)?;
                let callee = match self.absorb(reply)? {
                    Step::Value(v) => v,
                    Step::Returning(v) => return Ok(Reply::returning(v)),
                };
                let args = match self.eval_all(args)? {
                    Ok(values) => values,
                    Err(returned) => return Ok(Reply::returning(returned)),
                };
                let Value::Block(block) = &callee else {
                    return Err(not_callable(&callee).at(pos));
                };
                block
                    .invoke(self.ctx, &self.ns, args)
                    .map_err(|e| e.at(pos))
            }
        }
    }

    /// Evaluate left to right, merging after each. `Err` carries the value
    /// of a `return` that cut the sequence short.
    fn eval_all(&mut self, codes: &[Code]) -> Result<Result<Vec<Value>, Value>, EvalError> {
        let mut values = Vec::with_capacity(codes.len());
        for code in codes {
            let reply = self.eval(code)?;
            match self.absorb(reply)? {
                Step::Value(v) => values.push(v),
                Step::Returning(v) => return Ok(Err(v)),
            }
        }
        Ok(Ok(values))
    }
}

impl CompiledBody for BlockCode {
    #[tracing::instrument(level = "trace", skip_all, fields(pos = %self.pos))]
    fn run(&self, ctx: &EvalContext, block: &BlockValue, args: Vec<Value>) -> Result<Reply, EvalError> {
        let mut frame = Frame::new(
            ctx,
            block.captured().clone(),
            Value::list(args),
            Value::block(block.clone()),
        );
        frame.run_statements(&self.statements)
    }
}
