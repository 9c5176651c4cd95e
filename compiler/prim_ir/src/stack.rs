//! Stack safety for deep recursion.
//!
//! Unrolled recursion and repeated inlining can produce very deep trees.
//! Every recursive tree walk in the compiler wraps its recursive step in
//! [`ensure_sufficient_stack`], which grows the stack on demand.
//!
//! - **Red zone**: 100KB. If less than this remains, the stack is grown.
//! - **Growth size**: 1MB per growth.

const RED_ZONE: usize = 100 * 1024;

const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
