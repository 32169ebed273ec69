//! Containment search over expression trees.
//!
//! [`search`] finds every subtree whose own direct children include a given
//! branch. The driver uses it to detect the pathological case where a
//! fallback expansion still carries the expression it was supposed to
//! expand: re-expanding such a result would reproduce it forever, so the
//! occurrence has to be caught before any re-entrant call.
//!
//! The traversal prunes at matches: a subtree that matches is reported once
//! and not searched further, while its siblings and the rest of the tree
//! still are.

use seriatim_core::expr::{ExprId, ExprNode};
use seriatim_core::ExprArena;

/// Finds all subtrees of `tree` that have `branch` among their immediate
/// children, using structural equality.
///
/// With hash-consed storage, structural equality is handle equality.
#[must_use]
pub fn search(arena: &ExprArena, branch: ExprId, tree: ExprId) -> Vec<ExprId> {
    search_with(arena, branch, tree, &|_, a, b| a == b)
}

/// Like [`search`], generic over the equality predicate.
///
/// The predicate decides what "the same expression" means; callers can pass
/// anything from handle equality to a semantic comparison.
#[must_use]
pub fn search_with<F>(arena: &ExprArena, branch: ExprId, tree: ExprId, eq: &F) -> Vec<ExprId>
where
    F: Fn(&ExprArena, ExprId, ExprId) -> bool,
{
    let children = arena.get(tree).children();
    if children.is_empty() {
        return Vec::new();
    }
    if children.iter().any(|&child| eq(arena, child, branch)) {
        // report the parent and prune: matched subtrees are not searched
        return vec![tree];
    }
    let mut found = Vec::new();
    for &child in &children {
        found.extend(search_with(arena, branch, child, eq));
    }
    found
}

/// Filters a containment search down to the matches that make an expansion
/// divergent: occurrences of `branch` whose containing node is anything but
/// an unresolved-derivative marker.
///
/// A residual `diff(e, v, n)` legitimately carries the original expression;
/// every other occurrence means re-expansion would not terminate.
#[must_use]
pub fn divergent_matches(arena: &ExprArena, branch: ExprId, tree: ExprId) -> Vec<ExprId> {
    search(arena, branch, tree)
        .into_iter()
        .filter(|&m| !matches!(arena.get(m), ExprNode::Derivative { .. }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    /// Builds the n-ary tree `[a, b, ...]` used by the examples below.
    fn list(arena: &mut ExprArena, items: &[ExprId]) -> ExprId {
        arena.func("list", items.iter().copied().collect::<Vec<_>>())
    }

    fn setup() -> (ExprArena, [ExprId; 4]) {
        let mut arena = ExprArena::new();
        let nums = [1, 2, 3, 4].map(|n| arena.integer(n));
        (arena, nums)
    }

    #[test]
    fn match_at_the_root_reports_the_root() {
        let (mut arena, [one, two, three, _]) = setup();
        let tree = list(&mut arena, &[one, two, three]);

        assert_eq!(search(&arena, two, tree), vec![tree]);
    }

    #[test]
    fn repeated_children_report_the_parent_once() {
        let (mut arena, [one, two, three, _]) = setup();
        let tree = list(&mut arena, &[one, two, two, three]);

        assert_eq!(search(&arena, two, tree), vec![tree]);
    }

    #[test]
    fn nested_match_reports_the_inner_parent() {
        let (mut arena, [one, two, three, _]) = setup();
        let inner = list(&mut arena, &[two]);
        let tree = list(&mut arena, &[one, inner, three]);

        assert_eq!(search(&arena, two, tree), vec![inner]);
    }

    #[test]
    fn absent_branch_reports_nothing() {
        let (mut arena, [one, two, three, four]) = setup();
        let inner = list(&mut arena, &[two]);
        let tree = list(&mut arena, &[one, inner, three]);

        assert!(search(&arena, four, tree).is_empty());
    }

    #[test]
    fn disjoint_matches_all_report() {
        let (mut arena, [one, two, three, _]) = setup();
        let inner = list(&mut arena, &[two]);
        let tree = list(&mut arena, &[one, inner, three, inner]);

        assert_eq!(search(&arena, two, tree), vec![inner, inner]);
    }

    #[test]
    fn atoms_have_nothing_to_search() {
        let (arena, [one, two, ..]) = setup();
        assert!(search(&arena, one, two).is_empty());
        assert!(search(&arena, one, one).is_empty());
    }

    #[test]
    fn custom_equality_decides_matching() {
        let (mut arena, [one, two, three, _]) = setup();
        let tree = list(&mut arena, &[one, three]);

        // handle equality finds nothing...
        assert!(search(&arena, two, tree).is_empty());

        // ...a numeral-parity predicate finds the node holding `one`
        let same_parity = |arena: &ExprArena, a: ExprId, b: ExprId| {
            match (arena.get(a), arena.get(b)) {
                (ExprNode::Integer(m), ExprNode::Integer(n)) => (m % 2) == (n % 2),
                _ => false,
            }
        };
        assert_eq!(search_with(&arena, two, tree, &same_parity), Vec::<ExprId>::new());
        let four = arena.integer(4);
        let with_even = list(&mut arena, &[one, four]);
        assert_eq!(search_with(&arena, two, with_even, &same_parity), vec![with_even]);
    }

    #[test]
    fn derivative_markers_are_exempt_from_divergence() {
        let (mut arena, _) = setup();
        let x = arena.symbol("x");
        let f_x = arena.func("f", smallvec![x]);
        let marker = arena.derivative_marker(f_x, x, 1);
        let tree = arena.mul(smallvec![marker, x]);

        // the only occurrence of f(x) sits under the marker
        assert_eq!(search(&arena, f_x, tree), vec![marker]);
        assert!(divergent_matches(&arena, f_x, tree).is_empty());

        // a bare occurrence alongside it is not exempt
        let bare = arena.mul(smallvec![f_x, x]);
        assert_eq!(divergent_matches(&arena, f_x, bare), vec![bare]);
    }
}
