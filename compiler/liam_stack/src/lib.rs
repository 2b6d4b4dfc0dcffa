//! Stack growth for recursive tree walks.
//!
//! The parser, the body checker, the IR builder and the AST dump all
//! recurse once per nesting level of the source. Each of those walks enters
//! its recursive step through [`ensure_sufficient_stack`], so a deeply
//! nested but valid program is processed on a heap-allocated stack segment
//! instead of aborting the process.

/// Grow when less than this much stack is left.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    #[test]
    fn passes_result_through() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("nope"));
        assert_eq!(result, Err("nope"));
    }

    #[test]
    fn survives_deep_recursion() {
        assert_eq!(depth(200_000), 200_000);
    }
}
