//! Source positions.

use std::fmt;
use std::sync::Arc;

/// A point in a source file.
///
/// Lines and columns are 1-based. The path is reference counted so that the
/// thousands of positions produced for one file share a single allocation.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Position {
    pub path: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(path: Arc<str>, line: u32, column: u32) -> Self {
        Position { path, line, column }
    }

    /// The first character of `path`.
    pub fn start_of(path: Arc<str>) -> Self {
        Position::new(path, 1, 1)
    }

    /// Position with a placeholder path, for synthesized nodes and tests.
    pub fn detached(line: u32, column: u32) -> Self {
        Position::new(Arc::from("<detached>"), line, column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
