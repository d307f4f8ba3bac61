use std::cell::Cell;

use keel_stack::ensure_sufficient_stack;

use crate::errors::depth_exceeded;
use crate::print_handler::{PrintHandlerImpl, SharedPrintHandler};
use crate::EvalError;

/// Call depth limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Per-run state shared by every block invocation.
pub struct EvalContext {
    print: SharedPrintHandler,
    max_depth: usize,
    depth: Cell<usize>,
}

impl EvalContext {
    pub fn new(print: SharedPrintHandler, max_depth: usize) -> Self {
        EvalContext {
            print,
            max_depth,
            depth: Cell::new(0),
        }
    }

    #[inline]
    pub fn print_handler(&self) -> &PrintHandlerImpl {
        &self.print
    }

    /// Current nesting of compiled block invocations.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Run `f` one call level deeper, failing past the depth limit.
    pub(crate) fn enter<R>(
        &self,
        f: impl FnOnce() -> Result<R, EvalError>,
    ) -> Result<R, EvalError> {
        let depth = self.depth.get();
        if depth >= self.max_depth {
            return Err(depth_exceeded(self.max_depth));
        }
        self.depth.set(depth + 1);
        let result = ensure_sufficient_stack(f);
        self.depth.set(depth);
        result
    }
}
