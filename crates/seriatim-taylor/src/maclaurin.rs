//! Closed-form Maclaurin rules.
//!
//! The driver tries these before falling back to derivative-based
//! expansion: a built-in function applied directly to the leading expansion
//! variable, centered on zero, has a known coefficient sequence and needs
//! no differentiation at all.

use seriatim_calculus::{contains_var, norm};
use seriatim_core::expr::{functions, ExprId, ExprNode};
use seriatim_core::ExprArena;

use crate::expander::factorial;
use crate::ExpansionSpec;

/// Attempts a closed-form expansion of `e` for the leading stage.
///
/// Matches `sin(v)`, `cos(v)` and `exp(v)` where `v` is the leading stage's
/// variable, the point is the zero numeral, and `e` is free of every later
/// stage's variable (so the remaining stages contribute nothing). Returns
/// `None` when no rule applies.
pub fn known_series(
    arena: &mut ExprArena,
    e: ExprId,
    specs: &[ExpansionSpec],
) -> Option<ExprId> {
    let (stage, rest) = specs.split_first()?;
    if !arena.get(stage.point).is_zero() {
        return None;
    }
    let ExprNode::Function { id, args } = arena.get(e) else {
        return None;
    };
    let id = *id;
    if args.len() != 1 || args[0] != stage.variable {
        return None;
    }
    if rest.iter().any(|s| contains_var(arena, e, s.variable)) {
        return None;
    }

    let v = stage.variable;
    let n = stage.order;
    let mut terms = Vec::new();
    for k in 0..=n {
        let Some(numerator) = coefficient_numerator(id, k) else {
            return None;
        };
        if numerator == 0 {
            continue;
        }
        let coeff = arena.rational(numerator, factorial(k));
        let k_expr = arena.integer(i64::from(k));
        let v_pow = norm::pow(arena, v, k_expr);
        terms.push(norm::mul(arena, [coeff, v_pow]));
    }
    Some(norm::add(arena, terms))
}

/// Numerator of the k-th series coefficient (the denominator is k!), or
/// `None` if the function has no rule here.
fn coefficient_numerator(id: u32, k: u32) -> Option<i64> {
    match id {
        functions::EXP => Some(1),
        // sin: x - x^3/3! + x^5/5! - ...
        functions::SIN => Some(match k % 4 {
            1 => 1,
            3 => -1,
            _ => 0,
        }),
        // cos: 1 - x^2/2! + x^4/4! - ...
        functions::COS => Some(match k % 4 {
            0 => 1,
            2 => -1,
            _ => 0,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seriatim_core::render;
    use smallvec::smallvec;

    fn setup() -> (ExprArena, ExprId, ExprId) {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let zero = arena.integer(0);
        (arena, x, zero)
    }

    #[test]
    fn sin_series() {
        let (mut arena, x, zero) = setup();
        let sin_x = arena.func("sin", smallvec![x]);

        let s = known_series(&mut arena, sin_x, &[ExpansionSpec::new(x, zero, 5)]).unwrap();
        assert_eq!(render(&arena, s), "x - 1/6*x^3 + 1/120*x^5");
    }

    #[test]
    fn cos_series() {
        let (mut arena, x, zero) = setup();
        let cos_x = arena.func("cos", smallvec![x]);

        let s = known_series(&mut arena, cos_x, &[ExpansionSpec::new(x, zero, 4)]).unwrap();
        assert_eq!(render(&arena, s), "1 - 1/2*x^2 + 1/24*x^4");
    }

    #[test]
    fn truncation_respects_the_order() {
        let (mut arena, x, zero) = setup();
        let sin_x = arena.func("sin", smallvec![x]);

        let s = known_series(&mut arena, sin_x, &[ExpansionSpec::new(x, zero, 0)]).unwrap();
        assert!(arena.get(s).is_zero());

        let s = known_series(&mut arena, sin_x, &[ExpansionSpec::new(x, zero, 2)]).unwrap();
        assert_eq!(s, x);
    }

    #[test]
    fn no_rule_matches_elsewhere() {
        let (mut arena, x, zero) = setup();
        let one = arena.integer(1);

        // unknown function
        let f_x = arena.func("f", smallvec![x]);
        assert!(known_series(&mut arena, f_x, &[ExpansionSpec::new(x, zero, 2)]).is_none());

        // non-zero center
        let sin_x = arena.func("sin", smallvec![x]);
        assert!(known_series(&mut arena, sin_x, &[ExpansionSpec::new(x, one, 2)]).is_none());

        // argument is not the expansion variable
        let sum = norm::add(&mut arena, [x, one]);
        let sin_shift = arena.func("sin", smallvec![sum]);
        assert!(known_series(&mut arena, sin_shift, &[ExpansionSpec::new(x, zero, 2)]).is_none());

        // no stages at all
        assert!(known_series(&mut arena, sin_x, &[]).is_none());
    }
}
