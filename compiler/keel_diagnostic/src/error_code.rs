use std::fmt;

/// Error codes for all Keel diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E3xxx: Pattern match errors
/// - E6xxx: Runtime argument errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal (leading zero, trailing separator)
    E0003,
    /// `'` not followed by an identifier
    E0004,

    // Parser Errors (E1xxx)
    /// Unexpected token or bracket
    E1001,
    /// Expected a value
    E1002,
    /// Premature end of input inside a bracket
    E1003,
    /// Operator not in the precedence table
    E1004,
    /// Leading, trailing, or adjacent operator
    E1005,
    /// Implicit application of something that cannot be called
    E1006,
    /// More than one statement inside parentheses
    E1007,
    /// Operator assigned to more than one precedence band
    E1008,

    // Pattern Errors (E3xxx)
    /// Pattern did not match
    E3001,
    /// Matcher block returned neither a bool nor a map
    E3002,
    /// Same name bound twice by one pattern
    E3003,

    // Runtime Errors (E6xxx)
    /// Wrong number of arguments
    E6001,
    /// Argument of the wrong kind
    E6002,
    /// Called a value that is not a block
    E6003,
    /// Division or remainder by zero
    E6004,
    /// Index out of bounds or key not present
    E6005,
    /// Maximum call depth exceeded
    E6006,
    /// Binding a name that is already bound in scope
    E6007,
    /// Bindings map key is not an atom
    E6008,

    // Internal Errors (E9xxx)
    /// Lexer invariant violated
    E9001,
    /// Parser invariant violated
    E9002,
    /// Runtime invariant violated
    E9003,
}

/// The compiler phase an error code belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Lex,
    Parse,
    Match,
    Runtime,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            // Pattern
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            // Runtime
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            // Internal
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::E9003 => "E9003",
        }
    }

    pub fn phase(&self) -> Phase {
        match self.as_str().as_bytes()[1] {
            b'0' => Phase::Lex,
            b'1' => Phase::Parse,
            b'3' => Phase::Match,
            b'6' => Phase::Runtime,
            _ => Phase::Internal,
        }
    }

    /// Whether this code reports a bug in Keel rather than in the program.
    pub fn is_internal(&self) -> bool {
        self.phase() == Phase::Internal
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
