//! Property-based tests for the containment search.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use seriatim_core::expr::ExprId;
    use seriatim_core::ExprArena;

    use crate::guard::{search, search_with};

    /// Shape of a random n-ary test tree.
    #[derive(Debug, Clone)]
    enum Tree {
        Leaf(i64),
        Node(Vec<Tree>),
    }

    fn tree_strategy() -> impl Strategy<Value = Tree> {
        let leaf = (0i64..6).prop_map(Tree::Leaf);
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop::collection::vec(inner, 1..4).prop_map(Tree::Node)
        })
    }

    fn intern_tree(arena: &mut ExprArena, tree: &Tree) -> ExprId {
        match tree {
            Tree::Leaf(n) => arena.integer(*n),
            Tree::Node(children) => {
                let ids: Vec<ExprId> = children
                    .iter()
                    .map(|c| intern_tree(arena, c))
                    .collect();
                arena.func("list", ids)
            }
        }
    }

    proptest! {
        #[test]
        fn every_match_has_the_branch_as_a_direct_child(
            tree in tree_strategy(),
            b in 0i64..6,
        ) {
            let mut arena = ExprArena::new();
            let root = intern_tree(&mut arena, &tree);
            let branch = arena.integer(b);

            for m in search(&arena, branch, root) {
                let node = arena.get(m);
                prop_assert!(!node.is_atom());
                prop_assert!(node.children().contains(&branch));
            }
        }

        #[test]
        fn absent_branches_are_never_found(tree in tree_strategy()) {
            let mut arena = ExprArena::new();
            let root = intern_tree(&mut arena, &tree);
            let absent = arena.integer(99);

            prop_assert!(search(&arena, absent, root).is_empty());
        }

        #[test]
        fn degenerate_predicates_behave(tree in tree_strategy(), b in 0i64..6) {
            let mut arena = ExprArena::new();
            let root = intern_tree(&mut arena, &tree);
            let branch = arena.integer(b);

            // a predicate that never matches finds nothing
            let never = |_: &ExprArena, _: ExprId, _: ExprId| false;
            prop_assert!(search_with(&arena, branch, root, &never).is_empty());

            // one that always matches reports the root alone (or nothing,
            // for an atom): the traversal prunes at the first match
            let always = |_: &ExprArena, _: ExprId, _: ExprId| true;
            let found = search_with(&arena, branch, root, &always);
            if arena.get(root).is_atom() {
                prop_assert!(found.is_empty());
            } else {
                prop_assert_eq!(found, vec![root]);
            }
        }
    }
}
