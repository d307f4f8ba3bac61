use std::fmt;
use std::rc::Rc;

use keel_ir::Name;

use super::Value;
use crate::{EvalContext, EvalError, Namespace, Reply};

/// Signature of a builtin block.
///
/// Receives the caller's active namespace and the evaluated arguments.
pub type NativeFn = fn(&EvalContext, &Namespace<Value>, Vec<Value>) -> Result<Reply, EvalError>;

/// Executable body of a block literal, supplied by the evaluator.
pub trait CompiledBody {
    /// Run the body. `block` is the closure being invoked; its captured
    /// namespace is the starting scope.
    fn run(&self, ctx: &EvalContext, block: &BlockValue, args: Vec<Value>) -> Result<Reply, EvalError>;
}

#[derive(Clone)]
pub enum BlockBody {
    Native { name: Name, func: NativeFn },
    Compiled(Rc<dyn CompiledBody>),
}

/// A closure: the namespace at its definition site plus its body.
#[derive(Clone)]
pub struct BlockValue {
    captured: Namespace<Value>,
    body: BlockBody,
}

impl BlockValue {
    pub fn native(name: impl Into<Name>, func: NativeFn) -> Self {
        BlockValue {
            captured: Namespace::new(),
            body: BlockBody::Native {
                name: name.into(),
                func,
            },
        }
    }

    pub fn compiled(captured: Namespace<Value>, body: Rc<dyn CompiledBody>) -> Self {
        BlockValue {
            captured,
            body: BlockBody::Compiled(body),
        }
    }

    #[inline]
    pub fn captured(&self) -> &Namespace<Value> {
        &self.captured
    }

    #[inline]
    pub fn body(&self) -> &BlockBody {
        &self.body
    }

    /// Builtin name, `None` for block literals.
    pub fn native_name(&self) -> Option<&Name> {
        match &self.body {
            BlockBody::Native { name, .. } => Some(name),
            BlockBody::Compiled(_) => None,
        }
    }

    /// Call the block. Natives see `caller`; compiled bodies start from
    /// their captured namespace and count against the call depth limit.
    pub fn invoke(
        &self,
        ctx: &EvalContext,
        caller: &Namespace<Value>,
        args: Vec<Value>,
    ) -> Result<Reply, EvalError> {
        match &self.body {
            BlockBody::Native { func, .. } => func(ctx, caller, args),
            BlockBody::Compiled(body) => ctx.enter(|| body.run(ctx, self, args)),
        }
    }
}

impl fmt::Debug for BlockValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            BlockBody::Native { name, .. } => write!(f, "Native({name})"),
            BlockBody::Compiled(_) => write!(f, "Block({} captured)", self.captured.len()),
        }
    }
}
