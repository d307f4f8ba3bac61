//! Result of one call under the namespace-threading convention.

use crate::{MapValue, Value};

/// Whether evaluation completed normally or is unwinding toward a `loop`.
#[derive(Clone, Debug)]
pub enum Flow {
    Normal(Value),
    /// Raised by `return`; passes through every statement and argument
    /// evaluation until the nearest `loop` turns it back into `Normal`.
    Returning(Value),
}

impl Flow {
    #[inline]
    pub fn value(&self) -> &Value {
        match self {
            Flow::Normal(v) | Flow::Returning(v) => v,
        }
    }

    #[inline]
    pub fn into_value(self) -> Value {
        match self {
            Flow::Normal(v) | Flow::Returning(v) => v,
        }
    }

    #[inline]
    pub fn is_returning(&self) -> bool {
        matches!(self, Flow::Returning(_))
    }
}

/// What a call hands back to its caller: bindings to merge into the
/// caller's active namespace (if any) and the resulting flow.
#[derive(Clone, Debug)]
pub struct Reply {
    pub bindings: Option<MapValue>,
    pub flow: Flow,
}

impl Reply {
    /// A plain value with no bindings.
    #[inline]
    pub fn value(value: Value) -> Self {
        Reply {
            bindings: None,
            flow: Flow::Normal(value),
        }
    }

    pub fn with_bindings(bindings: MapValue, value: Value) -> Self {
        Reply {
            bindings: Some(bindings),
            flow: Flow::Normal(value),
        }
    }

    pub fn returning(value: Value) -> Self {
        Reply {
            bindings: None,
            flow: Flow::Returning(value),
        }
    }

    #[inline]
    pub fn unit() -> Self {
        Reply::value(Value::Unit)
    }
}
