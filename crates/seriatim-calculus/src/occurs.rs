//! Free-occurrence test.

use seriatim_core::expr::ExprId;
use seriatim_core::ExprArena;

/// Checks whether `v` occurs anywhere in `e`.
///
/// Unresolved-derivative markers are searched like any other compound, so a
/// residual `diff(f(x), x, 1)` does count as an occurrence of `x`.
#[must_use]
pub fn contains_var(arena: &ExprArena, e: ExprId, v: ExprId) -> bool {
    if e == v {
        return true;
    }
    arena
        .get(e)
        .children()
        .iter()
        .any(|&child| contains_var(arena, child, v))
}
