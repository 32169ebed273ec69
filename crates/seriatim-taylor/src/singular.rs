//! Expansion-point validation.

use seriatim_core::ExprArena;

use crate::{ExpansionError, ExpansionSpec};

/// Checks that no stage expands about an infinite point.
///
/// # Errors
///
/// Returns [`ExpansionError::InfiniteExpansionPoint`] for the first stage
/// whose point is a directed infinity.
pub fn check_points(arena: &ExprArena, specs: &[ExpansionSpec]) -> Result<(), ExpansionError> {
    for stage in specs {
        if arena.get(stage.point).is_infinite() {
            return Err(ExpansionError::InfiniteExpansionPoint { point: stage.point });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seriatim_core::Sign;

    #[test]
    fn finite_points_pass() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.integer(0);
        let c = arena.symbol("c");

        let specs = [
            ExpansionSpec::new(x, zero, 3),
            ExpansionSpec::new(x, c, 0),
        ];
        assert!(check_points(&arena, &specs).is_ok());
        assert!(check_points(&arena, &[]).is_ok());
    }

    #[test]
    fn infinite_points_are_rejected() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.integer(0);
        let pos_inf = arena.infinity(Sign::Positive);
        let neg_inf = arena.infinity(Sign::Negative);

        let specs = [
            ExpansionSpec::new(x, zero, 1),
            ExpansionSpec::new(x, pos_inf, 1),
        ];
        assert_eq!(
            check_points(&arena, &specs),
            Err(ExpansionError::InfiniteExpansionPoint { point: pos_inf })
        );

        let specs = [ExpansionSpec::new(x, neg_inf, 2)];
        assert_eq!(
            check_points(&arena, &specs),
            Err(ExpansionError::InfiniteExpansionPoint { point: neg_inf })
        );
    }
}
