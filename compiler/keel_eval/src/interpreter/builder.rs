//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use keel_parse::PrecedenceTable;
use keel_patterns::{stdout_handler, SharedPrintHandler, DEFAULT_MAX_DEPTH};

use super::Interpreter;
use crate::builtins;

/// Builder for [`Interpreter`].
///
/// Defaults: output to stdout, no program arguments, the standard operator
/// table, and a call depth limit of [`DEFAULT_MAX_DEPTH`].
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    args: Vec<String>,
    precedence: Option<PrecedenceTable>,
    max_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            args: Vec::new(),
            precedence: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set where `print` and `println` write.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the program arguments, visible as `args` at top level.
    #[must_use]
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the operator table used when parsing source.
    #[must_use]
    pub fn precedence(mut self, table: PrecedenceTable) -> Self {
        self.precedence = Some(table);
        self
    }

    /// Set the maximum nesting of block invocations.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            print: self.print_handler.unwrap_or_else(stdout_handler),
            args: self.args,
            precedence: self.precedence.unwrap_or_else(PrecedenceTable::standard),
            max_depth: self.max_depth,
            builtins: builtins::bootstrap(),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        InterpreterBuilder::new()
    }
}
