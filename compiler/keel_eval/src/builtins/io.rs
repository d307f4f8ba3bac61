use keel_patterns::errors::arity_mismatch;
use keel_patterns::{EvalContext, EvalError, Namespace, Reply, Value};

use super::exactly;

fn joined(args: &[Value]) -> String {
    args.iter()
        .map(Value::display_value)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `println args...`: space-separated, newline-terminated.
pub(super) fn println(
    ctx: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    ctx.print_handler().println(&joined(&args));
    Ok(Reply::unit())
}

pub(super) fn print(
    ctx: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    if args.is_empty() {
        return Err(arity_mismatch("print", "at least 1", 0));
    }
    ctx.print_handler().print(&joined(&args));
    Ok(Reply::unit())
}

/// `str value`: the printed form as a string.
pub(super) fn str(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [value] = exactly("str", args)?;
    Ok(Reply::value(Value::string(value.display_value())))
}
