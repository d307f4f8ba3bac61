//! Stack growth for the recursive phases of Keel.
//!
//! Parsing, equality, pattern matching and execution all recurse once per
//! level of source nesting, and namespace insertion recurses once per level of
//! tree depth (which degrades to linear on sorted insertion order). Each of
//! those recursion points is wrapped in [`ensure_sufficient_stack`] so that
//! adversarially deep input grows the stack instead of aborting the process.
//!
//! - **Red zone**: 128KB. Below this much remaining stack we grow.
//! - **Growth size**: 2MB per segment.
//!
//! On `wasm32` the guard is a passthrough.

/// Minimum stack space to keep available before recursing.
const RED_ZONE: usize = 128 * 1024;

/// Stack space allocated for each new segment.
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn value(&mut self) -> Result<Expr, ParseError> {
///     ensure_sufficient_stack(|| self.value_inner())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
