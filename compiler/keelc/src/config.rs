//! Driver configuration read from the environment.

use keel_eval::{Interpreter, InterpreterBuilder, DEFAULT_MAX_DEPTH};

/// Overrides the maximum nesting of block invocations.
pub const MAX_DEPTH_VAR: &str = "KEEL_MAX_DEPTH";

/// `EnvFilter` directives for the tracing subscriber.
pub const LOG_VAR: &str = "KEEL_LOG";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got `{value}`")]
    InvalidMaxDepth { var: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub max_depth: usize,
}

impl DriverConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_depth = match lookup(MAX_DEPTH_VAR) {
            None => DEFAULT_MAX_DEPTH,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => {
                    return Err(ConfigError::InvalidMaxDepth {
                        var: MAX_DEPTH_VAR,
                        value: raw,
                    })
                }
            },
        };
        Ok(DriverConfig { max_depth })
    }

    /// An interpreter builder carrying this configuration.
    pub fn interpreter(&self) -> InterpreterBuilder {
        Interpreter::builder().max_depth(self.max_depth)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
