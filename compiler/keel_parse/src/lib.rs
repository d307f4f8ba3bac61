//! Keel parser.
//!
//! Two cooperating layers:
//! - [`Parser`]: structural recursive descent over brackets and newlines,
//!   producing flat runs of values and operator symbols.
//! - [`OperatorParser`]: precedence climbing over one run, driven by a
//!   [`PrecedenceTable`], desugaring every infix operator into a call.
//!
//! Errors are fatal. The first lex or parse error aborts with its position.

mod error;
mod operator;
mod parser;
mod precedence;

pub use error::{Misplacement, ParseError};
pub use operator::{OperatorParser, RunItem};
pub use parser::{parse, Parser};
pub use precedence::{PrecedenceTable, CALL_PRECEDENCE};

#[cfg(test)]
mod tests;
